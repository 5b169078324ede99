//! Ranged attack resolution: DEX to hit, no STR on damage.

use crate::dice::DiceService;

use super::super::context::CombatContext;
use super::super::effects::Effect;
use super::super::engine::EngineError;
use super::super::events::{CombatEvent, Rejection, RejectionCode};
use super::super::modifiers::ModifiedStat;
use super::{ActionOutcome, check_actor, check_enemy_target};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RangedAttackAction {
    pub actor_id: String,
    pub target_id: String,
}

impl RangedAttackAction {
    pub fn validate(&self, ctx: &CombatContext) -> Vec<Rejection> {
        if let Some(rejection) = check_actor(ctx, &self.actor_id) {
            return vec![rejection];
        }
        let Some(actor) = ctx.combatant(&self.actor_id) else {
            return Vec::new();
        };
        let Some(pc) = actor.entity.as_pc() else {
            return vec![Rejection::new(
                RejectionCode::MonsterActionNotSupported,
                "monsters cannot make ranged attacks",
            )];
        };
        if !pc.has_ranged_weapon() {
            return vec![Rejection::new(
                RejectionCode::NoRangedWeapon,
                "no ranged weapon equipped",
            )];
        }
        if let Some(rejection) = check_enemy_target(ctx, actor.side, &self.target_id) {
            return vec![rejection];
        }
        Vec::new()
    }

    pub fn execute(
        &self,
        ctx: &CombatContext,
        dice: &dyn DiceService,
    ) -> Result<ActionOutcome, EngineError> {
        let attacker = ctx
            .combatant(&self.actor_id)
            .ok_or_else(|| EngineError::UnknownCombatant {
                id: self.actor_id.clone(),
            })?;
        let defender = ctx
            .combatant(&self.target_id)
            .ok_or_else(|| EngineError::UnknownCombatant {
                id: self.target_id.clone(),
            })?;
        let pc = attacker
            .entity
            .as_pc()
            .ok_or_else(|| EngineError::UnknownCombatant {
                id: self.actor_id.clone(),
            })?;

        let attack_bonus = ctx.modifiers.get_total(&self.actor_id, ModifiedStat::Attack);
        let damage_bonus = ctx.modifiers.get_total(&self.actor_id, ModifiedStat::Damage);
        let effective_ac = defender.armor_class()
            + ctx.modifiers.get_total(&self.target_id, ModifiedStat::ArmorClass);

        let needed = pc.to_hit_target_ac(effective_ac);
        let roll = pc.ranged_attack_roll(dice)?;
        let raw = roll.total;
        let total = roll.total_with_modifier + attack_bonus;
        let critical = raw == 20;
        let hit = critical || (raw > 1 && total >= needed);

        let mut outcome = ActionOutcome::default();
        outcome.events.push(CombatEvent::AttackRolled {
            attacker_id: self.actor_id.clone(),
            defender_id: self.target_id.clone(),
            roll: raw,
            total,
            needed,
            hit,
            critical,
        });
        if hit {
            let damage = pc.ranged_damage_roll(dice)?;
            let mut amount = damage.total_with_modifier + damage_bonus;
            if critical {
                amount = (amount * 3 + 1) / 2;
            }
            outcome.effects.push(Effect::Damage {
                source_id: self.actor_id.clone(),
                target_id: self.target_id.clone(),
                amount: amount.max(0),
            });
        }
        Ok(outcome)
    }
}
