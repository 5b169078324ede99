//! Engine-level errors.
//!
//! Rejections (expected validation failures) are events, not errors; the
//! variants here are the unexpected conditions that fault an encounter,
//! plus the caller-facing misuse errors.

use crate::dice::DiceError;

/// Errors surfaced by [`super::CombatEngine`].
///
/// Any of these escaping a state handler converts into an
/// `EncounterFaulted` event and a terminal `ENDED` state.
#[derive(Debug, thiserror::Error, strum::IntoStaticStr)]
pub enum EngineError {
    #[error("unknown combatant: {id}")]
    UnknownCombatant { id: String },

    #[error("unknown spell: {id}")]
    UnknownSpell { id: String },

    #[error("unknown item: {name}")]
    UnknownItem { name: String },

    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error("combat engine did not reach a decision point within {max_steps} steps")]
    LoopExhausted { max_steps: u32 },

    #[error("cannot queue forced intent after encounter ended")]
    EncounterEnded,
}

impl EngineError {
    /// Stable variant name for logs and the `EncounterFaulted` event.
    pub fn error_type(&self) -> &'static str {
        self.into()
    }
}
