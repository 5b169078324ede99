//! Combat participants: player characters, monsters, and the uniform
//! capability set the engine sees them through.
//!
//! Dispatch over the two participant kinds is a tagged enum rather than a
//! trait object: the set is closed, and exhaustive `match` keeps every
//! capability total.

mod abilities;
mod classes;
mod monster;
mod party;
mod player;

pub use abilities::{AbilityScores, score_modifier};
pub use classes::{AttackType, CharacterClassType, hit_die, saving_throw_target, spell_slots, thac0, to_hit_target_ac};
pub use monster::{Alignment, Monster, MonsterParty, MonsterStatsBlock};
pub use party::Party;
pub use player::{Loadout, PlayerCharacter, Weapon};

use crate::dice::{DiceError, DiceService};

/// Either side's participant, behind one capability surface.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Entity {
    Pc(PlayerCharacter),
    Monster(Monster),
}

impl Entity {
    pub fn name(&self) -> &str {
        match self {
            Self::Pc(pc) => pc.name(),
            Self::Monster(m) => m.name(),
        }
    }

    pub fn is_alive(&self) -> bool {
        match self {
            Self::Pc(pc) => pc.is_alive(),
            Self::Monster(m) => m.is_alive(),
        }
    }

    pub fn hit_points(&self) -> i32 {
        match self {
            Self::Pc(pc) => pc.hit_points(),
            Self::Monster(m) => m.hit_points(),
        }
    }

    pub fn max_hit_points(&self) -> i32 {
        match self {
            Self::Pc(pc) => pc.max_hit_points(),
            Self::Monster(m) => m.max_hit_points(),
        }
    }

    pub fn armor_class(&self) -> i32 {
        match self {
            Self::Pc(pc) => pc.armor_class(),
            Self::Monster(m) => m.armor_class(),
        }
    }

    pub fn apply_damage(&mut self, amount: i32) {
        match self {
            Self::Pc(pc) => pc.apply_damage(amount),
            Self::Monster(m) => m.apply_damage(amount),
        }
    }

    pub fn heal(&mut self, amount: i32) {
        match self {
            Self::Pc(pc) => pc.heal(amount),
            Self::Monster(m) => m.heal(amount),
        }
    }

    pub fn initiative_roll(&self, dice: &dyn DiceService) -> Result<i32, DiceError> {
        match self {
            Self::Pc(pc) => pc.initiative_roll(dice),
            Self::Monster(m) => m.initiative_roll(dice),
        }
    }

    pub fn saving_throw_target(&self, attack: AttackType) -> i32 {
        match self {
            Self::Pc(pc) => pc.saving_throw_target(attack),
            Self::Monster(m) => m.saving_throw_target(attack),
        }
    }

    pub fn is_undead(&self) -> bool {
        match self {
            Self::Pc(_) => false,
            Self::Monster(m) => m.is_undead(),
        }
    }

    /// Hit dice for spell filters and turn undead: a monster's HD count,
    /// a character's class level, never less than 1.
    pub fn hit_dice_count(&self) -> u32 {
        match self {
            Self::Pc(pc) => u32::from(pc.level()).max(1),
            Self::Monster(m) => m.hit_dice_count(),
        }
    }

    pub fn as_pc(&self) -> Option<&PlayerCharacter> {
        match self {
            Self::Pc(pc) => Some(pc),
            Self::Monster(_) => None,
        }
    }

    pub fn as_pc_mut(&mut self) -> Option<&mut PlayerCharacter> {
        match self {
            Self::Pc(pc) => Some(pc),
            Self::Monster(_) => None,
        }
    }

    pub fn as_monster(&self) -> Option<&Monster> {
        match self {
            Self::Pc(_) => None,
            Self::Monster(m) => Some(m),
        }
    }

    pub fn as_monster_mut(&mut self) -> Option<&mut Monster> {
        match self {
            Self::Pc(_) => None,
            Self::Monster(m) => Some(m),
        }
    }
}
