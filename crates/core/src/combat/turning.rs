//! The cleric-level x undead-tier Turn Undead table.

/// One cell of the turning table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnCell {
    /// Needed 2d6 result.
    Roll(i32),
    /// Automatic turn.
    Turn,
    /// Automatic destruction.
    Destroy,
    /// This tier cannot be turned at this cleric level.
    Impossible,
}

use TurnCell::{Destroy as D, Impossible as N, Turn as T};

const fn r(needed: i32) -> TurnCell {
    TurnCell::Roll(needed)
}

/// Rows are cleric levels 1..=8+ (level 8 covers everything above);
/// columns are undead tiers 1..=8.
const TURN_TABLE: [[TurnCell; 8]; 8] = [
    [r(7), r(9), r(11), N, N, N, N, N],
    [T, r(7), r(9), r(11), N, N, N, N],
    [T, T, r(7), r(9), r(11), N, N, N],
    [D, T, T, r(7), r(9), r(11), N, N],
    [D, D, T, T, r(7), r(9), r(11), N],
    [D, D, D, T, T, r(7), r(9), r(11)],
    [D, D, D, D, T, T, r(7), r(9)],
    [D, D, D, D, D, T, T, r(7)],
];

/// Undead tier for a hit-dice count.
///
/// Tiers track the classic ladder (skeleton, zombie, ghoul, wight, ...),
/// which runs one step above raw HD from 3 HD up.
pub fn undead_tier(hit_dice: u32) -> u8 {
    match hit_dice {
        0 | 1 => 1,
        2 => 2,
        n => (n + 1).min(8) as u8,
    }
}

/// Table cell for a cleric level against an undead tier.
pub fn turn_cell(cleric_level: u8, tier: u8) -> TurnCell {
    let row = cleric_level.clamp(1, 8) as usize - 1;
    let col = tier.clamp(1, 8) as usize - 1;
    TURN_TABLE[row][col]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_from_hit_dice() {
        assert_eq!(undead_tier(1), 1);
        assert_eq!(undead_tier(2), 2);
        assert_eq!(undead_tier(3), 4, "wights are tier 4");
        assert_eq!(undead_tier(8), 8);
        assert_eq!(undead_tier(20), 8);
        assert_eq!(undead_tier(0), 1);
    }

    #[test]
    fn level_one_cleric_cells() {
        assert_eq!(turn_cell(1, 1), TurnCell::Roll(7));
        assert_eq!(turn_cell(1, 2), TurnCell::Roll(9));
        assert_eq!(turn_cell(1, 4), TurnCell::Impossible);
    }

    #[test]
    fn auto_turn_and_destroy_progression() {
        assert_eq!(turn_cell(2, 1), TurnCell::Turn);
        assert_eq!(turn_cell(3, 2), TurnCell::Turn);
        assert_eq!(turn_cell(3, 4), TurnCell::Roll(9));
        assert_eq!(turn_cell(4, 1), TurnCell::Destroy);
        assert_eq!(turn_cell(2, 8), TurnCell::Impossible);
    }

    #[test]
    fn high_levels_clamp_to_the_last_row() {
        assert_eq!(turn_cell(14, 8), TurnCell::Roll(7));
        assert_eq!(turn_cell(14, 1), TurnCell::Destroy);
    }
}
