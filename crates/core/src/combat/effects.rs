//! Effects: deferred mutations produced by action resolution.
//!
//! Resolution never touches the context directly. Actions return an
//! ordered effect list, and the engine applies it in `APPLY_EFFECTS` after
//! all resolution events have been emitted.

use super::modifiers::ModifiedStat;

/// A single deferred mutation.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "effect")]
pub enum Effect {
    Damage {
        source_id: String,
        target_id: String,
        amount: i32,
    },
    Heal {
        source_id: String,
        target_id: String,
        amount: i32,
    },
    /// Spend one of the caster's spell slots at the given level. Failure
    /// blocks every later damage/heal/condition/modifier effect of the
    /// same action.
    ConsumeSlot {
        caster_id: String,
        level: u8,
    },
    ApplyCondition {
        source_id: String,
        target_id: String,
        condition_id: String,
        duration: Option<u32>,
    },
    ApplyModifier {
        source_id: String,
        target_id: String,
        modifier_id: String,
        stat: ModifiedStat,
        value: i32,
        duration: Option<u32>,
    },
    Flee {
        target_id: String,
    },
}
