//! Turn Undead: the cleric class ability.

use crate::dice::DiceService;
use crate::entity::CharacterClassType;

use super::super::context::CombatContext;
use super::super::effects::Effect;
use super::super::engine::EngineError;
use super::super::events::{CombatEvent, Rejection, RejectionCode, TurnResult};
use super::super::targeting::combatant_hd;
use super::super::turning::{TurnCell, turn_cell, undead_tier};
use super::{ActionOutcome, check_actor};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnUndeadAction {
    pub actor_id: String,
}

struct UndeadTarget {
    id: String,
    hd: u32,
    hit_points: i32,
    cell: TurnCell,
}

impl TurnUndeadAction {
    pub fn validate(&self, ctx: &CombatContext) -> Vec<Rejection> {
        if let Some(rejection) = check_actor(ctx, &self.actor_id) {
            return vec![rejection];
        }
        let Some(actor) = ctx.combatant(&self.actor_id) else {
            return Vec::new();
        };
        let is_cleric = actor
            .entity
            .as_pc()
            .is_some_and(|pc| pc.class() == CharacterClassType::Cleric);
        if !is_cleric {
            return vec![Rejection::new(
                RejectionCode::IneligibleCaster,
                "only a Cleric can turn undead",
            )];
        }
        let enemy_side = actor.side.opposite();
        let any_undead = ctx
            .living(enemy_side)
            .iter()
            .any(|c| c.entity.is_undead());
        if !any_undead {
            return vec![Rejection::new(
                RejectionCode::InvalidTarget,
                "no undead enemies present",
            )];
        }
        Vec::new()
    }

    pub fn execute(
        &self,
        ctx: &CombatContext,
        dice: &dyn DiceService,
    ) -> Result<ActionOutcome, EngineError> {
        let actor = ctx
            .combatant(&self.actor_id)
            .ok_or_else(|| EngineError::UnknownCombatant {
                id: self.actor_id.clone(),
            })?;
        let cleric_level = actor.entity.as_pc().map(|pc| pc.level()).unwrap_or(1);

        let mut undead: Vec<UndeadTarget> = ctx
            .living(actor.side.opposite())
            .iter()
            .filter(|c| c.entity.is_undead())
            .map(|c| {
                let hd = combatant_hd(&c.entity);
                UndeadTarget {
                    id: c.id.clone(),
                    hd,
                    hit_points: c.entity.hit_points(),
                    cell: turn_cell(cleric_level, undead_tier(hd)),
                }
            })
            .collect();
        undead.sort_by_key(|u| u.hd);

        let mut outcome = ActionOutcome::default();
        let Some(lowest) = undead.first() else {
            return Ok(outcome);
        };

        // The attempt is resolved against the lowest-HD tier present.
        let (roll, target_number, result) = match lowest.cell {
            TurnCell::Impossible => (0, None, TurnResult::Impossible),
            TurnCell::Turn => (0, None, TurnResult::Turned),
            TurnCell::Destroy => (0, None, TurnResult::Destroyed),
            TurnCell::Roll(needed) => {
                let roll = dice.roll("2d6")?.total_with_modifier;
                if roll >= needed {
                    (roll, Some(needed), TurnResult::Turned)
                } else {
                    (roll, Some(needed), TurnResult::Failed)
                }
            }
        };
        outcome.events.push(CombatEvent::TurnUndeadAttempted {
            actor_id: self.actor_id.clone(),
            roll,
            target_number,
            result,
        });
        if !matches!(result, TurnResult::Turned | TurnResult::Destroyed) {
            return Ok(outcome);
        }

        // 2d6 hit dice of undead are affected, lowest HD first. The first
        // eligible target is always affected; tiers unreachable at this
        // cleric level never are.
        let pool = dice.roll("2d6")?.total_with_modifier.max(0) as u32;
        let mut remaining = pool;
        let mut first = true;
        for target in undead
            .iter()
            .filter(|u| !matches!(u.cell, TurnCell::Impossible))
        {
            let cost = target.hd.max(1);
            if !first && remaining < cost {
                break;
            }
            remaining = remaining.saturating_sub(cost);
            first = false;

            let destroyed = matches!(target.cell, TurnCell::Destroy);
            outcome.events.push(CombatEvent::UndeadTurned {
                actor_id: self.actor_id.clone(),
                target_id: target.id.clone(),
                destroyed,
                hd_spent: cost,
            });
            if destroyed {
                outcome.effects.push(Effect::Damage {
                    source_id: self.actor_id.clone(),
                    target_id: target.id.clone(),
                    amount: target.hit_points,
                });
            } else {
                outcome.effects.push(Effect::Flee {
                    target_id: target.id.clone(),
                });
            }
        }
        Ok(outcome)
    }
}
