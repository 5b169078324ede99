//! Player characters and their combat loadout.

use crate::dice::{DiceError, DiceRoll, DiceService};

use super::abilities::AbilityScores;
use super::classes::{self, AttackType, CharacterClassType};

/// A weapon as combat sees it: a name and a damage die.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage_die: String,
}

impl Weapon {
    pub fn new(name: &str, damage_die: &str) -> Self {
        Self {
            name: name.to_string(),
            damage_die: damage_die.to_string(),
        }
    }
}

/// The slice of an inventory the combat engine cares about.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Loadout {
    pub melee_weapon: Weapon,
    pub ranged_weapon: Option<Weapon>,
    /// Known spell ids (catalog keys).
    pub spells: Vec<String>,
    /// Carried item names (throwables among them are usable in combat).
    pub items: Vec<String>,
}

impl Default for Loadout {
    fn default() -> Self {
        Self {
            melee_weapon: Weapon::new("Fists", "1d2"),
            ranged_weapon: None,
            spells: Vec::new(),
            items: Vec::new(),
        }
    }
}

/// A player character, reduced to the capability set combat needs.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PlayerCharacter {
    name: String,
    class: CharacterClassType,
    level: u8,
    abilities: AbilityScores,
    hit_points: i32,
    max_hit_points: i32,
    armor_class: i32,
    loadout: Loadout,
}

impl PlayerCharacter {
    /// Create a character, rolling hit points per level on the class hit die.
    pub fn new(
        name: &str,
        class: CharacterClassType,
        level: u8,
        abilities: AbilityScores,
        dice: &dyn DiceService,
    ) -> Result<Self, DiceError> {
        let die = classes::hit_die(class);
        let mut hp = 0;
        for _ in 0..level.max(1) {
            let roll = dice.roll_with_modifier(die, abilities.hp_modifier())?;
            hp += roll.total_with_modifier.max(1);
        }
        Ok(Self {
            name: name.to_string(),
            class,
            level: level.max(1),
            abilities,
            hit_points: hp,
            max_hit_points: hp,
            armor_class: 9 - abilities.armor_class_modifier(),
            loadout: Loadout::default(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> CharacterClassType {
        self.class
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
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

    pub fn armor_class(&self) -> i32 {
        self.armor_class
    }

    /// Override armor class (worn armor is modeled by the application).
    pub fn set_armor_class(&mut self, armor_class: i32) {
        self.armor_class = armor_class;
    }

    /// Override hit points, clamping the maximum up to match.
    pub fn set_hit_points(&mut self, hit_points: i32) {
        self.hit_points = hit_points;
        self.max_hit_points = self.max_hit_points.max(hit_points);
    }

    pub fn loadout(&self) -> &Loadout {
        &self.loadout
    }

    pub fn loadout_mut(&mut self) -> &mut Loadout {
        &mut self.loadout
    }

    pub fn equip_melee_weapon(&mut self, weapon: Weapon) {
        self.loadout.melee_weapon = weapon;
    }

    pub fn equip_ranged_weapon(&mut self, weapon: Weapon) {
        self.loadout.ranged_weapon = Some(weapon);
    }

    pub fn has_ranged_weapon(&self) -> bool {
        self.loadout.ranged_weapon.is_some()
    }

    pub fn learn_spell(&mut self, spell_id: &str) {
        if !self.loadout.spells.iter().any(|s| s == spell_id) {
            self.loadout.spells.push(spell_id.to_string());
        }
    }

    pub fn knows_spell(&self, spell_id: &str) -> bool {
        self.loadout.spells.iter().any(|s| s == spell_id)
    }

    pub fn add_item(&mut self, item_name: &str) {
        self.loadout.items.push(item_name.to_string());
    }

    pub fn holds_item(&self, item_name: &str) -> bool {
        self.loadout.items.iter().any(|i| i == item_name)
    }

    /// Reduce hit points, to a floor of 0. Has no effect on the dead.
    pub fn apply_damage(&mut self, amount: i32) {
        if self.is_alive() {
            self.hit_points = (self.hit_points - amount).max(0);
        }
    }

    /// Restore hit points, capped at the maximum. Has no effect on the dead.
    pub fn heal(&mut self, amount: i32) {
        if self.is_alive() {
            self.hit_points = (self.hit_points + amount).min(self.max_hit_points);
        }
    }

    /// 1d6 plus the DEX initiative modifier.
    pub fn initiative_roll(&self, dice: &dyn DiceService) -> Result<i32, DiceError> {
        let roll = dice.roll_with_modifier("1d6", self.abilities.initiative_modifier())?;
        tracing::debug!(name = %self.name, total = roll.total_with_modifier, "initiative roll");
        Ok(roll.total_with_modifier)
    }

    /// 1d20 plus the STR to-hit modifier.
    pub fn attack_roll(&self, dice: &dyn DiceService) -> Result<DiceRoll, DiceError> {
        dice.roll_with_modifier("1d20", self.abilities.melee_modifier())
    }

    /// Melee weapon die plus the STR damage modifier.
    pub fn damage_roll(&self, dice: &dyn DiceService) -> Result<DiceRoll, DiceError> {
        let die = &self.loadout.melee_weapon.damage_die;
        dice.roll_with_modifier(die, self.abilities.melee_modifier())
    }

    /// 1d20 plus the DEX to-hit modifier.
    pub fn ranged_attack_roll(&self, dice: &dyn DiceService) -> Result<DiceRoll, DiceError> {
        dice.roll_with_modifier("1d20", self.abilities.ranged_modifier())
    }

    /// Ranged weapon die with no ability modifier.
    pub fn ranged_damage_roll(&self, dice: &dyn DiceService) -> Result<DiceRoll, DiceError> {
        let die = self
            .loadout
            .ranged_weapon
            .as_ref()
            .map(|w| w.damage_die.as_str())
            .unwrap_or("1d2");
        dice.roll(die)
    }

    pub fn to_hit_target_ac(&self, target_ac: i32) -> i32 {
        classes::to_hit_target_ac(self.class, self.level, target_ac)
    }

    pub fn saving_throw_target(&self, attack: AttackType) -> i32 {
        classes::saving_throw_target(self.class, self.level, attack)
    }

    /// Spell slots granted at this character's current level.
    pub fn spell_slots(&self) -> &'static [(u8, u32)] {
        classes::spell_slots(self.class, self.level)
    }
}
