//! The static spell catalog.
//!
//! Spell behavior is data: the cast-spell action interprets these
//! definitions, so new spells are catalog entries, not engine changes.

use crate::entity::{AttackType, CharacterClassType};

use super::modifiers::ModifiedStat;

/// How a spell enumerates targets.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetMode {
    SingleEnemy,
    AllEnemies,
    HdPool,
    #[serde(rename = "SELF")]
    #[strum(serialize = "SELF")]
    SelfTarget,
    SingleAlly,
    AllAllies,
}

/// A stat modifier granted by a buff/debuff spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpellModifier {
    pub id: &'static str,
    pub stat: ModifiedStat,
    pub value: i32,
    pub duration: u32,
}

/// Static behavior of one spell. Immutable after initialization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpellDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub spell_level: u8,
    pub classes: &'static [CharacterClassType],
    pub target_mode: TargetMode,
    /// Number of targets a single cast addresses; -1 means "all".
    pub num_targets: i32,
    /// Auto-hit spells never produce attack rolls.
    pub auto_hit: bool,
    pub damage_die: Option<&'static str>,
    /// Extra damage dice rolled once per caster level (capped).
    pub damage_per_level: Option<&'static str>,
    pub caster_level_cap: u8,
    /// `(min_caster_level, projectile_count)` pairs; the largest matching
    /// entry wins.
    pub projectile_thresholds: &'static [(u8, u32)],
    pub save_type: Option<AttackType>,
    /// On a successful save: `true` negates, `false` halves.
    pub save_negates: bool,
    /// Penalty applied to single-target saves (e.g. Hold Person's -2).
    pub single_save_penalty: i32,
    pub condition_id: Option<&'static str>,
    pub condition_duration: Option<u32>,
    /// Dice rolled for an HD-pool budget (Sleep).
    pub hd_pool_dice: Option<&'static str>,
    /// Targets above this HD are unaffected.
    pub max_target_hd: Option<u32>,
    /// Dice rolled for a random group size (Hold Person's group mode).
    pub group_target_dice: Option<&'static str>,
    pub heal_die: Option<&'static str>,
    pub modifiers: &'static [SpellModifier],
    pub is_reversed: bool,
    pub reverse_id: Option<&'static str>,
    /// Undead are immune (Sleep).
    pub undead_immune: bool,
}

const fn spell(
    id: &'static str,
    name: &'static str,
    spell_level: u8,
    classes: &'static [CharacterClassType],
    target_mode: TargetMode,
    num_targets: i32,
) -> SpellDefinition {
    SpellDefinition {
        id,
        name,
        spell_level,
        classes,
        target_mode,
        num_targets,
        auto_hit: false,
        damage_die: None,
        damage_per_level: None,
        caster_level_cap: 0,
        projectile_thresholds: &[],
        save_type: None,
        save_negates: true,
        single_save_penalty: 0,
        condition_id: None,
        condition_duration: None,
        hd_pool_dice: None,
        max_target_hd: None,
        group_target_dice: None,
        heal_die: None,
        modifiers: &[],
        is_reversed: false,
        reverse_id: None,
        undead_immune: false,
    }
}

const ARCANE: &[CharacterClassType] = &[CharacterClassType::MagicUser, CharacterClassType::Elf];
const DIVINE: &[CharacterClassType] = &[CharacterClassType::Cleric];
const LIGHT_CASTERS: &[CharacterClassType] = &[
    CharacterClassType::Cleric,
    CharacterClassType::MagicUser,
    CharacterClassType::Elf,
];

/// Every spell the engine knows, keyed by string id.
pub static SPELL_CATALOG: &[SpellDefinition] = &[
    SpellDefinition {
        auto_hit: true,
        damage_die: Some("1d6+1"),
        projectile_thresholds: &[(1, 1), (6, 3), (11, 5)],
        ..spell("magic_missile", "Magic Missile", 1, ARCANE, TargetMode::SingleEnemy, 1)
    },
    SpellDefinition {
        auto_hit: true,
        condition_id: Some("asleep"),
        hd_pool_dice: Some("2d8"),
        max_target_hd: Some(4),
        undead_immune: true,
        ..spell("sleep", "Sleep", 1, ARCANE, TargetMode::HdPool, -1)
    },
    SpellDefinition {
        auto_hit: true,
        condition_id: Some("held"),
        condition_duration: Some(9),
        save_type: Some(AttackType::RodsStavesSpells),
        single_save_penalty: -2,
        max_target_hd: Some(4),
        group_target_dice: Some("1d4"),
        ..spell("hold_person", "Hold Person", 2, DIVINE, TargetMode::SingleEnemy, 1)
    },
    SpellDefinition {
        auto_hit: true,
        damage_per_level: Some("1d6"),
        caster_level_cap: 10,
        save_type: Some(AttackType::DragonBreath),
        save_negates: false,
        ..spell("fireball", "Fireball", 3, ARCANE, TargetMode::AllEnemies, -1)
    },
    SpellDefinition {
        auto_hit: true,
        damage_per_level: Some("1d6"),
        caster_level_cap: 10,
        save_type: Some(AttackType::RodsStavesSpells),
        save_negates: false,
        ..spell("lightning_bolt", "Lightning Bolt", 3, ARCANE, TargetMode::AllEnemies, -1)
    },
    SpellDefinition {
        auto_hit: true,
        heal_die: Some("1d6+1"),
        reverse_id: Some("cause_light_wounds"),
        ..spell("cure_light_wounds", "Cure Light Wounds", 1, DIVINE, TargetMode::SingleAlly, 1)
    },
    SpellDefinition {
        auto_hit: true,
        damage_die: Some("1d6+1"),
        save_type: Some(AttackType::RodsStavesSpells),
        is_reversed: true,
        reverse_id: Some("cure_light_wounds"),
        ..spell("cause_light_wounds", "Cause Light Wounds", 1, DIVINE, TargetMode::SingleEnemy, 1)
    },
    SpellDefinition {
        auto_hit: true,
        modifiers: &[
            SpellModifier {
                id: "bless_atk",
                stat: ModifiedStat::Attack,
                value: 1,
                duration: 6,
            },
            SpellModifier {
                id: "bless_save",
                stat: ModifiedStat::Save,
                value: 1,
                duration: 6,
            },
        ],
        ..spell("bless", "Bless", 2, DIVINE, TargetMode::AllAllies, -1)
    },
    SpellDefinition {
        auto_hit: true,
        modifiers: &[SpellModifier {
            id: "shield_ac",
            stat: ModifiedStat::ArmorClass,
            value: -2,
            duration: 12,
        }],
        ..spell("shield", "Shield", 1, ARCANE, TargetMode::SelfTarget, 1)
    },
    SpellDefinition {
        auto_hit: true,
        condition_id: Some("blinded"),
        condition_duration: Some(12),
        save_type: Some(AttackType::RodsStavesSpells),
        ..spell("light_offensive", "Light", 1, LIGHT_CASTERS, TargetMode::SingleEnemy, 1)
    },
];

/// Look up a spell by id.
pub fn get_spell(spell_id: &str) -> Option<&'static SpellDefinition> {
    SPELL_CATALOG.iter().find(|s| s.id == spell_id)
}
