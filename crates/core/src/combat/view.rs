//! Frozen snapshots of combat state for UI consumption.

use std::collections::BTreeSet;

use super::context::CombatSide;

/// One combatant as the UI sees it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CombatantView {
    pub id: String,
    pub name: String,
    pub side: CombatSide,
    pub hp: i32,
    pub max_hp: i32,
    pub armor_class: i32,
    pub is_alive: bool,
    pub has_fled: bool,
    /// Active condition ids, in application order.
    pub conditions: Vec<String>,
}

/// Immutable snapshot of the whole encounter.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CombatView {
    pub round_number: u32,
    pub current_combatant_id: Option<String>,
    pub combatants: Vec<CombatantView>,
    pub announced_deaths: BTreeSet<String>,
}
