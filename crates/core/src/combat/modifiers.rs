//! Temporary stat modifiers from buffs and debuffs.

use std::collections::BTreeMap;

/// Which statistic a temporary modifier adjusts.
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
pub enum ModifiedStat {
    Attack,
    ArmorClass,
    Save,
    Damage,
}

/// An active temporary modifier on a combatant.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActiveModifier {
    pub modifier_id: String,
    pub source_id: String,
    pub stat: ModifiedStat,
    pub value: i32,
    /// `None` means the modifier lasts until removed.
    pub remaining_rounds: Option<u32>,
}

impl ActiveModifier {
    pub fn new(
        modifier_id: &str,
        source_id: &str,
        stat: ModifiedStat,
        value: i32,
        remaining_rounds: Option<u32>,
    ) -> Self {
        Self {
            modifier_id: modifier_id.to_string(),
            source_id: source_id.to_string(),
            stat,
            value,
            remaining_rounds,
        }
    }
}

/// Stores temporary stat modifiers per combatant and answers totals.
#[derive(Debug, Default)]
pub struct ModifierTracker {
    modifiers: BTreeMap<String, Vec<ActiveModifier>>,
}

impl ModifierTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, target_id: &str, modifier: ActiveModifier) {
        self.modifiers
            .entry(target_id.to_string())
            .or_default()
            .push(modifier);
    }

    /// Sum of all active modifiers for a stat on a combatant.
    pub fn get_total(&self, target_id: &str, stat: ModifiedStat) -> i32 {
        self.modifiers
            .get(target_id)
            .map(|ms| ms.iter().filter(|m| m.stat == stat).map(|m| m.value).sum())
            .unwrap_or(0)
    }

    pub fn get_all(&self, target_id: &str) -> &[ActiveModifier] {
        self.modifiers
            .get(target_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Decrement durations and drop expired modifiers.
    ///
    /// Returns `(combatant_id, modifier_id)` pairs for everything that
    /// expired this round, in combatant-id order.
    pub fn tick_round(&mut self) -> Vec<(String, String)> {
        let mut expired = Vec::new();
        for (target_id, modifiers) in self.modifiers.iter_mut() {
            modifiers.retain_mut(|modifier| {
                let Some(remaining) = modifier.remaining_rounds else {
                    return true;
                };
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    expired.push((target_id.clone(), modifier.modifier_id.clone()));
                    false
                } else {
                    modifier.remaining_rounds = Some(remaining);
                    true
                }
            });
        }
        expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_total_by_stat() {
        let mut tracker = ModifierTracker::new();
        tracker.add(
            "pc:Alice",
            ActiveModifier::new("bless_atk", "pc:Cleric", ModifiedStat::Attack, 1, Some(6)),
        );
        assert_eq!(tracker.get_total("pc:Alice", ModifiedStat::Attack), 1);
        assert_eq!(tracker.get_total("pc:Alice", ModifiedStat::ArmorClass), 0);
        assert_eq!(tracker.get_total("pc:Bob", ModifiedStat::Attack), 0);
    }

    #[test]
    fn modifiers_stack() {
        let mut tracker = ModifierTracker::new();
        tracker.add(
            "pc:Alice",
            ActiveModifier::new("bless_atk", "pc:Cleric", ModifiedStat::Attack, 1, Some(6)),
        );
        tracker.add(
            "pc:Alice",
            ActiveModifier::new("magic_atk", "pc:MU", ModifiedStat::Attack, 2, Some(3)),
        );
        assert_eq!(tracker.get_total("pc:Alice", ModifiedStat::Attack), 3);
    }

    #[test]
    fn tick_round_expires_at_zero() {
        let mut tracker = ModifierTracker::new();
        tracker.add(
            "pc:Alice",
            ActiveModifier::new("shield_ac", "pc:MU", ModifiedStat::ArmorClass, -2, Some(1)),
        );
        let expired = tracker.tick_round();
        assert_eq!(
            expired,
            vec![("pc:Alice".to_string(), "shield_ac".to_string())]
        );
        assert_eq!(tracker.get_total("pc:Alice", ModifiedStat::ArmorClass), 0);
    }

    #[test]
    fn tick_round_decrements_without_expiring() {
        let mut tracker = ModifierTracker::new();
        tracker.add(
            "pc:Alice",
            ActiveModifier::new("shield_ac", "pc:MU", ModifiedStat::ArmorClass, -2, Some(3)),
        );
        assert!(tracker.tick_round().is_empty());
        assert_eq!(tracker.get_total("pc:Alice", ModifiedStat::ArmorClass), -2);
    }

    #[test]
    fn permanent_modifiers_survive_ticks() {
        let mut tracker = ModifierTracker::new();
        tracker.add(
            "pc:Alice",
            ActiveModifier::new("ring_save", "pc:Alice", ModifiedStat::Save, 1, None),
        );
        for _ in 0..50 {
            assert!(tracker.tick_round().is_empty());
        }
        assert_eq!(tracker.get_total("pc:Alice", ModifiedStat::Save), 1);
    }
}
