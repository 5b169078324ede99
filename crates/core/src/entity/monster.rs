//! Monsters: stat blocks, rolled instances, and the monster group.

use crate::dice::{DiceError, DiceRoll, DiceService};

use super::classes::{self, AttackType, CharacterClassType};

/// Alignment of a character or monster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    Lawful,
    Neutral,
    Chaotic,
}

/// Static description of a monster type.
///
/// One stat block spawns a whole [`MonsterParty`]; per-instance values
/// (hit points, group size) are rolled at spawn time.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonsterStatsBlock {
    pub name: String,
    pub description: String,
    pub armor_class: i32,
    /// Hit dice expression, e.g. `"1d8"`, `"3d8+1"`, or a bare `"1"` for a
    /// guaranteed single hit point.
    pub hit_dice: String,
    pub movement: u32,
    pub num_special_abilities: u32,
    pub attacks_per_round: u32,
    pub damage_per_attack: String,
    /// Group-size expression rolled at spawn, e.g. `"1d6"` or `"3"`.
    pub num_appearing: String,
    pub save_as_class: CharacterClassType,
    pub save_as_level: u8,
    /// 2–12; a score of 12 never checks morale.
    pub morale: u8,
    pub alignment: Alignment,
    pub is_undead: bool,
}

impl MonsterStatsBlock {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: String::new(),
            armor_class: 10,
            hit_dice: "1d8".to_string(),
            movement: 120,
            num_special_abilities: 0,
            attacks_per_round: 1,
            damage_per_attack: "1d4".to_string(),
            num_appearing: "1d6".to_string(),
            save_as_class: CharacterClassType::Fighter,
            save_as_level: 1,
            morale: 12,
            alignment: Alignment::Neutral,
            is_undead: false,
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn armor_class(mut self, armor_class: i32) -> Self {
        self.armor_class = armor_class;
        self
    }

    pub fn hit_dice(mut self, hit_dice: &str) -> Self {
        self.hit_dice = hit_dice.to_string();
        self
    }

    pub fn attacks_per_round(mut self, attacks: u32) -> Self {
        self.attacks_per_round = attacks;
        self
    }

    pub fn damage_per_attack(mut self, damage: &str) -> Self {
        self.damage_per_attack = damage.to_string();
        self
    }

    pub fn num_appearing(mut self, num_appearing: &str) -> Self {
        self.num_appearing = num_appearing.to_string();
        self
    }

    pub fn save_as(mut self, class: CharacterClassType, level: u8) -> Self {
        self.save_as_class = class;
        self.save_as_level = level;
        self
    }

    pub fn morale(mut self, morale: u8) -> Self {
        self.morale = morale;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn undead(mut self) -> Self {
        self.is_undead = true;
        self
    }
}

/// B/X monster XP by hit dice, with a bonus per special ability.
fn xp_value(hp_roll: &DiceRoll, num_special_abilities: u32) -> u32 {
    // Monsters rolling less than a d8 are "under 1 HD".
    let (base, bonus) = if hp_roll.num_sides < 8 {
        (5, 1)
    } else {
        let plus = hp_roll.modifier > 0;
        match (hp_roll.num_dice, plus) {
            (1, false) => (10, 3),
            (1, true) => (15, 4),
            (2, false) => (20, 5),
            (2, true) => (25, 10),
            (3, false) => (35, 15),
            (3, true) => (50, 25),
            (4, false) => (75, 50),
            (4, true) => (125, 75),
            (5, false) => (175, 125),
            (5, true) => (225, 175),
            (6, false) => (275, 225),
            (6, true) => (350, 300),
            (7, _) => (450, 400),
            (8, _) => (650, 550),
            (9..=10, _) => (900, 700),
            (11..=12, _) => (1100, 800),
            (13..=16, _) => (1350, 950),
            (17..=20, _) => (2000, 1150),
            _ => (2500, 2000),
        }
    };
    base + bonus * num_special_abilities
}

/// Monster THAC0 indexed by effective hit dice.
fn monster_thac0(hp_roll: &DiceRoll) -> i32 {
    // A "+" monster attacks on the next row up.
    let effective = if hp_roll.modifier > 0 {
        hp_roll.num_dice
    } else {
        hp_roll.num_dice.saturating_sub(1)
    };
    match effective {
        0 => 19,
        1 => 18,
        2 => 17,
        3 => 16,
        4 => 15,
        5 => 14,
        6 => 13,
        7..=8 => 12,
        9..=10 => 11,
        11..=12 => 10,
        13..=14 => 9,
        15..=16 => 8,
        17..=18 => 7,
        19..=20 => 6,
        _ => 5,
    }
}

/// A single rolled monster instance.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Monster {
    name: String,
    armor_class: i32,
    hp_roll: DiceRoll,
    hit_points: i32,
    max_hit_points: i32,
    attacks_per_round: u32,
    damage_per_attack: String,
    save_as_class: CharacterClassType,
    save_as_level: u8,
    morale: u8,
    is_undead: bool,
    xp_value: u32,
}

impl Monster {
    pub fn new(stats: &MonsterStatsBlock, dice: &dyn DiceService) -> Result<Self, DiceError> {
        let hp_roll = dice.roll(&stats.hit_dice)?;
        let hit_points = hp_roll.total_with_modifier.max(1);
        Ok(Self {
            name: stats.name.clone(),
            armor_class: stats.armor_class,
            xp_value: xp_value(&hp_roll, stats.num_special_abilities),
            hp_roll,
            hit_points,
            max_hit_points: hit_points,
            attacks_per_round: stats.attacks_per_round,
            damage_per_attack: stats.damage_per_attack.clone(),
            save_as_class: stats.save_as_class,
            save_as_level: stats.save_as_level,
            morale: stats.morale,
            is_undead: stats.is_undead,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn armor_class(&self) -> i32 {
        self.armor_class
    }

    pub fn hit_points(&self) -> i32 {
        self.hit_points
    }

    pub fn max_hit_points(&self) -> i32 {
        self.max_hit_points
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    pub fn is_undead(&self) -> bool {
        self.is_undead
    }

    pub fn morale(&self) -> u8 {
        self.morale
    }

    pub fn xp_value(&self) -> u32 {
        self.xp_value
    }

    pub fn attacks_per_round(&self) -> u32 {
        self.attacks_per_round
    }

    /// Hit-dice count, floored at 1 ("under 1 HD" creatures count as 1).
    pub fn hit_dice_count(&self) -> u32 {
        if self.hp_roll.num_sides < 8 {
            1
        } else {
            self.hp_roll.num_dice.max(1)
        }
    }

    pub fn set_hit_points(&mut self, hit_points: i32) {
        self.hit_points = hit_points;
        self.max_hit_points = self.max_hit_points.max(hit_points);
    }

    pub fn apply_damage(&mut self, amount: i32) {
        if self.is_alive() {
            self.hit_points = (self.hit_points - amount).max(0);
        }
    }

    pub fn heal(&mut self, amount: i32) {
        if self.is_alive() {
            self.hit_points = (self.hit_points + amount).min(self.max_hit_points);
        }
    }

    pub fn initiative_roll(&self, dice: &dyn DiceService) -> Result<i32, DiceError> {
        Ok(dice.roll("1d6")?.total_with_modifier)
    }

    /// The d20 total required to hit the given armor class, floored at 2.
    pub fn to_hit_target_ac(&self, target_ac: i32) -> i32 {
        (monster_thac0(&self.hp_roll) - target_ac).max(2)
    }

    /// One 1d20 roll per attack this monster makes each round.
    pub fn attack_rolls(&self, dice: &dyn DiceService) -> Result<Vec<DiceRoll>, DiceError> {
        (0..self.attacks_per_round).map(|_| dice.roll("1d20")).collect()
    }

    pub fn damage_roll(&self, dice: &dyn DiceService) -> Result<DiceRoll, DiceError> {
        dice.roll(&self.damage_per_attack)
    }

    pub fn saving_throw_target(&self, attack: AttackType) -> i32 {
        classes::saving_throw_target(self.save_as_class, self.save_as_level, attack)
    }
}

/// The opposition side of an encounter: monsters spawned from one stat block.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MonsterParty {
    pub members: Vec<Monster>,
    pub is_surprised: bool,
}

impl MonsterParty {
    /// Roll `num_appearing` and spawn that many monsters.
    pub fn spawn(stats: &MonsterStatsBlock, dice: &dyn DiceService) -> Result<Self, DiceError> {
        let count = dice.roll(&stats.num_appearing)?.total_with_modifier.max(1);
        let members = (0..count)
            .map(|_| Monster::new(stats, dice))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            members,
            is_surprised: false,
        })
    }

    pub fn from_members(members: Vec<Monster>) -> Self {
        Self {
            members,
            is_surprised: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.members.iter().any(Monster::is_alive)
    }

    /// Total XP awarded for defeating (or routing) the group.
    pub fn total_xp(&self) -> u32 {
        self.members.iter().map(Monster::xp_value).sum()
    }
}
