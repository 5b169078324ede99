//! Condition tracking: held, asleep, blinded, and friends.
//!
//! Conditions live on combatants for a number of rounds (or until removed),
//! can force their bearer to skip turns, and can break when the bearer
//! takes damage.

use std::collections::BTreeMap;

/// Static flags describing how a condition type behaves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConditionBehavior {
    pub skip_turn: bool,
    pub break_on_damage: bool,
}

/// Behavior flags for a condition id. Unknown ids carry no flags.
pub fn condition_behavior(condition_id: &str) -> ConditionBehavior {
    match condition_id {
        "held" => ConditionBehavior {
            skip_turn: true,
            break_on_damage: false,
        },
        "asleep" => ConditionBehavior {
            skip_turn: true,
            break_on_damage: true,
        },
        "blinded" => ConditionBehavior::default(),
        _ => ConditionBehavior::default(),
    }
}

/// An active condition instance on a specific combatant.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActiveCondition {
    pub condition_id: String,
    pub source_id: String,
    /// `None` means permanent until removed.
    pub remaining_rounds: Option<u32>,
    pub skip_turn: bool,
    pub break_on_damage: bool,
}

impl ActiveCondition {
    /// Build an instance with flags drawn from the condition registry.
    pub fn from_registry(condition_id: &str, source_id: &str, remaining_rounds: Option<u32>) -> Self {
        let behavior = condition_behavior(condition_id);
        Self {
            condition_id: condition_id.to_string(),
            source_id: source_id.to_string(),
            remaining_rounds,
            skip_turn: behavior.skip_turn,
            break_on_damage: behavior.break_on_damage,
        }
    }
}

/// Stores and queries active conditions per combatant.
#[derive(Debug, Default)]
pub struct ConditionTracker {
    conditions: BTreeMap<String, Vec<ActiveCondition>>,
}

impl ConditionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target_id: &str, condition: ActiveCondition) {
        self.conditions
            .entry(target_id.to_string())
            .or_default()
            .push(condition);
    }

    /// Remove and return the first matching condition, if any.
    pub fn remove(&mut self, target_id: &str, condition_id: &str) -> Option<ActiveCondition> {
        let conditions = self.conditions.get_mut(target_id)?;
        let idx = conditions
            .iter()
            .position(|c| c.condition_id == condition_id)?;
        Some(conditions.remove(idx))
    }

    pub fn has(&self, target_id: &str, condition_id: &str) -> bool {
        self.conditions
            .get(target_id)
            .is_some_and(|cs| cs.iter().any(|c| c.condition_id == condition_id))
    }

    pub fn get_all(&self, target_id: &str) -> &[ActiveCondition] {
        self.conditions
            .get(target_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn should_skip_turn(&self, target_id: &str) -> bool {
        self.get_all(target_id).iter().any(|c| c.skip_turn)
    }

    /// Condition id of the first turn-skipping condition, if any.
    pub fn skip_reason(&self, target_id: &str) -> Option<&str> {
        self.get_all(target_id)
            .iter()
            .find(|c| c.skip_turn)
            .map(|c| c.condition_id.as_str())
    }

    /// Decrement durations and drop expired conditions.
    ///
    /// Returns `(combatant_id, condition_id)` pairs for everything that
    /// expired this round, in combatant-id order.
    pub fn tick_round(&mut self) -> Vec<(String, String)> {
        let mut expired = Vec::new();
        for (target_id, conditions) in self.conditions.iter_mut() {
            conditions.retain_mut(|cond| {
                let Some(remaining) = cond.remaining_rounds else {
                    return true;
                };
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    expired.push((target_id.clone(), cond.condition_id.clone()));
                    false
                } else {
                    cond.remaining_rounds = Some(remaining);
                    true
                }
            });
        }
        expired
    }

    /// Remove every break-on-damage condition from a combatant, returning
    /// the removed condition ids.
    pub fn remove_break_on_damage(&mut self, target_id: &str) -> Vec<String> {
        let Some(conditions) = self.conditions.get_mut(target_id) else {
            return Vec::new();
        };
        let mut removed = Vec::new();
        conditions.retain(|cond| {
            if cond.break_on_damage {
                removed.push(cond.condition_id.clone());
                false
            } else {
                true
            }
        });
        removed
    }
}
