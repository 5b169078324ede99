//! B/X morale for the monster group.
//!
//! Monsters test 2d6 against their morale score when the first of them
//! dies and again when half the group is incapacitated. Each trigger fires
//! at most once per encounter; two passed checks (or a score of 12) make
//! the group immune for the rest of the fight.

/// Per-encounter morale state for the monster side.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MoraleState {
    pub morale_score: u8,
    pub is_immune: bool,
    pub first_death_checked: bool,
    pub half_dead_checked: bool,
    pub checks_passed: u8,
}

impl MoraleState {
    pub fn new(morale_score: u8) -> Self {
        Self {
            morale_score,
            is_immune: morale_score >= 12,
            first_death_checked: false,
            half_dead_checked: false,
            checks_passed: 0,
        }
    }

    /// Record a passed check. Returns `true` if the group just became
    /// immune (second pass).
    pub fn record_pass(&mut self) -> bool {
        self.checks_passed += 1;
        if self.checks_passed >= 2 {
            self.is_immune = true;
        }
        self.is_immune
    }
}
