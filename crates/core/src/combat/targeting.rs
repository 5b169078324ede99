//! Targeting helpers for group and HD-pool spells.

use crate::dice::{DiceError, DiceService};
use crate::entity::Entity;

/// Pick up to `count` candidates uniformly, without replacement.
///
/// Selection randomness flows through the dice service so fixed-dice runs
/// stay deterministic. `count >= candidates.len()` returns every candidate
/// in input order.
pub fn resolve_random_group(
    candidates: &[String],
    count: usize,
    dice: &dyn DiceService,
) -> Result<Vec<String>, DiceError> {
    if count >= candidates.len() {
        return Ok(candidates.to_vec());
    }
    let mut pool: Vec<String> = candidates.to_vec();
    let mut picked = Vec::with_capacity(count);
    for _ in 0..count {
        let roll = dice.roll(&format!("1d{}", pool.len()))?;
        let idx = (roll.total.clamp(1, pool.len() as i32) - 1) as usize;
        picked.push(pool.remove(idx));
    }
    Ok(picked)
}

/// Greedily fill an HD budget from the lowest-HD candidates up.
///
/// Candidates are sorted ascending by HD (stable, so input order breaks
/// ties); each is included while it still fits, and the scan stops at the
/// first candidate whose inclusion would exceed the budget. An HD of 0
/// counts as 1.
pub fn resolve_hd_pool(candidates: &[(String, u32)], budget: u32) -> Vec<String> {
    let mut sorted: Vec<&(String, u32)> = candidates.iter().collect();
    sorted.sort_by_key(|(_, hd)| *hd);

    let mut included = Vec::new();
    let mut spent = 0;
    for (id, hd) in sorted {
        let cost = (*hd).max(1);
        if spent + cost > budget {
            break;
        }
        spent += cost;
        included.push(id.clone());
    }
    included
}

/// Hit dice used for spell filters: a monster's HD count, a character's
/// class level, never less than 1.
pub fn combatant_hd(entity: &Entity) -> u32 {
    entity.hit_dice_count()
}
