//! Combat context: combatant registry and the mutable state bag the
//! engine threads through every transition.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::entity::{Entity, MonsterParty, Party};

use super::conditions::ConditionTracker;
use super::intents::ActionIntent;
use super::modifiers::ModifierTracker;
use super::morale::MoraleState;

/// Which side of the encounter a combatant belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CombatSide {
    Pc,
    Monster,
}

impl CombatSide {
    pub fn opposite(self) -> Self {
        match self {
            Self::Pc => Self::Monster,
            Self::Monster => Self::Pc,
        }
    }
}

/// Uniform handle wrapping either a PC or a monster.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CombatantRef {
    pub id: String,
    pub side: CombatSide,
    pub has_fled: bool,
    pub entity: Entity,
}

impl CombatantRef {
    pub fn is_alive(&self) -> bool {
        self.entity.is_alive()
    }

    pub fn name(&self) -> &str {
        self.entity.name()
    }

    pub fn armor_class(&self) -> i32 {
        self.entity.armor_class()
    }
}

/// Convert a canonical id into a concise display label.
///
/// `"pc:Sckricko"` renders as `"Sckricko"`; `"monster:Goblin:0"` renders as
/// `"Goblin #1"`.
pub fn display_name(combatant_id: &str) -> String {
    if let Some(name) = combatant_id.strip_prefix("pc:") {
        return name.to_string();
    }
    if let Some(rest) = combatant_id.strip_prefix("monster:") {
        if let Some((name, idx)) = rest.rsplit_once(':') {
            if let Ok(idx) = idx.parse::<usize>() {
                return format!("{} #{}", name, idx + 1);
            }
        }
        return rest.to_string();
    }
    combatant_id.to_string()
}

/// Mutable encounter state carried through the engine's lifecycle.
///
/// The combatant list is append-only after build and keeps registration
/// order; initiative tie-breaking and target enumeration both depend on it.
#[derive(Debug)]
pub struct CombatContext {
    combatants: Vec<CombatantRef>,
    pub turn_queue: VecDeque<String>,
    pub current_combatant_id: Option<String>,
    pub round_number: u32,
    pub announced_deaths: BTreeSet<String>,
    pub forced_intents: HashMap<String, ActionIntent>,
    pub conditions: ConditionTracker,
    pub modifiers: ModifierTracker,
    pub morale: MoraleState,
    /// Remaining spell slots per caster id, seeded lazily from the class
    /// table the first time a caster's choices or slot consumption are
    /// evaluated.
    pub spell_slots_remaining: HashMap<String, BTreeMap<u8, u32>>,
    pub pcs_surprised: bool,
    pub monsters_surprised: bool,
}

impl CombatContext {
    /// Register both parties under canonical ids.
    ///
    /// PC ids are `"pc:{name}"`; monster ids are
    /// `"monster:{name}:{zero_based_index}"`. The engine owns the entities
    /// for the encounter's lifetime.
    pub fn build(pc_party: Party, monster_party: MonsterParty) -> Self {
        let mut combatants = Vec::new();
        for pc in pc_party.members {
            combatants.push(CombatantRef {
                id: format!("pc:{}", pc.name()),
                side: CombatSide::Pc,
                has_fled: false,
                entity: Entity::Pc(pc),
            });
        }
        let morale_score = monster_party
            .members
            .first()
            .map(|m| m.morale())
            .unwrap_or(12);
        for (idx, monster) in monster_party.members.into_iter().enumerate() {
            combatants.push(CombatantRef {
                id: format!("monster:{}:{}", monster.name(), idx),
                side: CombatSide::Monster,
                has_fled: false,
                entity: Entity::Monster(monster),
            });
        }
        Self {
            combatants,
            turn_queue: VecDeque::new(),
            current_combatant_id: None,
            round_number: 0,
            announced_deaths: BTreeSet::new(),
            forced_intents: HashMap::new(),
            conditions: ConditionTracker::new(),
            modifiers: ModifierTracker::new(),
            morale: MoraleState::new(morale_score),
            spell_slots_remaining: HashMap::new(),
            pcs_surprised: false,
            monsters_surprised: false,
        }
    }

    pub fn combatants(&self) -> &[CombatantRef] {
        &self.combatants
    }

    pub fn combatant(&self, id: &str) -> Option<&CombatantRef> {
        self.combatants.iter().find(|c| c.id == id)
    }

    pub fn combatant_mut(&mut self, id: &str) -> Option<&mut CombatantRef> {
        self.combatants.iter_mut().find(|c| c.id == id)
    }

    /// Living combatants on a side, excluding any that have fled.
    pub fn living(&self, side: CombatSide) -> Vec<&CombatantRef> {
        self.combatants
            .iter()
            .filter(|c| c.side == side && c.is_alive() && !c.has_fled)
            .collect()
    }

    pub fn pcs_alive(&self) -> bool {
        !self.living(CombatSide::Pc).is_empty()
    }

    pub fn monsters_alive(&self) -> bool {
        !self.living(CombatSide::Monster).is_empty()
    }

    pub fn monster_total(&self) -> usize {
        self.combatants
            .iter()
            .filter(|c| c.side == CombatSide::Monster)
            .count()
    }

    pub fn monsters_dead(&self) -> usize {
        self.combatants
            .iter()
            .filter(|c| c.side == CombatSide::Monster && !c.is_alive())
            .count()
    }

    /// Total XP value of the monster group (the award hook for the
    /// surrounding encounter wrapper).
    pub fn monster_xp_total(&self) -> u32 {
        self.combatants
            .iter()
            .filter_map(|c| c.entity.as_monster())
            .map(|m| m.xp_value())
            .sum()
    }

    /// Seed the slot cache for a caster from its class table, if absent.
    pub fn ensure_slot_cache(&mut self, caster_id: &str) {
        if self.spell_slots_remaining.contains_key(caster_id) {
            return;
        }
        let slots: BTreeMap<u8, u32> = self
            .combatant(caster_id)
            .and_then(|c| c.entity.as_pc())
            .map(|pc| pc.spell_slots().iter().copied().collect())
            .unwrap_or_default();
        self.spell_slots_remaining
            .insert(caster_id.to_string(), slots);
    }

    /// Remaining slots at a level for an already-cached caster.
    pub fn cached_slots_remaining(&self, caster_id: &str, level: u8) -> u32 {
        self.spell_slots_remaining
            .get(caster_id)
            .and_then(|slots| slots.get(&level))
            .copied()
            .unwrap_or(0)
    }

    /// Consume one slot; `None` means no slot remained at that level.
    pub fn consume_spell_slot(&mut self, caster_id: &str, level: u8) -> Option<u32> {
        self.ensure_slot_cache(caster_id);
        let slots = self.spell_slots_remaining.get_mut(caster_id)?;
        let remaining = slots.get_mut(&level)?;
        if *remaining == 0 {
            return None;
        }
        *remaining -= 1;
        Some(*remaining)
    }
}
