//! Throwable combat items.
//!
//! A small static table keyed by item name; anything not listed here
//! cannot be thrown in combat.

/// A throwable item's combat behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrowableItem {
    pub name: &'static str,
    pub damage_die: &'static str,
}

pub static THROWABLE_ITEMS: &[ThrowableItem] = &[
    ThrowableItem {
        name: "Flask of Oil",
        damage_die: "1d8",
    },
    ThrowableItem {
        name: "Holy Water",
        damage_die: "1d8",
    },
];

/// Look up a throwable item by name.
pub fn throwable_item(name: &str) -> Option<&'static ThrowableItem> {
    THROWABLE_ITEMS.iter().find(|item| item.name == name)
}
