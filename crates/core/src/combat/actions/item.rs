//! Thrown combat items (oil flasks, holy water).

use crate::dice::DiceService;

use super::super::context::CombatContext;
use super::super::effects::Effect;
use super::super::engine::EngineError;
use super::super::events::{CombatEvent, Rejection, RejectionCode};
use super::super::items::throwable_item;
use super::{ActionOutcome, check_actor, check_enemy_target};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UseItemAction {
    pub actor_id: String,
    pub item_name: String,
    pub target_ids: Vec<String>,
}

impl UseItemAction {
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
                "monsters cannot use items",
            )];
        };
        if throwable_item(&self.item_name).is_none() {
            return vec![Rejection::new(
                RejectionCode::ItemNotThrowable,
                format!("{} is not throwable", self.item_name),
            )];
        }
        if !pc.holds_item(&self.item_name) {
            return vec![Rejection::new(
                RejectionCode::ItemNotInInventory,
                format!("{} is not in inventory", self.item_name),
            )];
        }
        for target_id in &self.target_ids {
            if let Some(rejection) = check_enemy_target(ctx, actor.side, target_id) {
                return vec![rejection];
            }
        }
        Vec::new()
    }

    pub fn execute(
        &self,
        ctx: &CombatContext,
        dice: &dyn DiceService,
    ) -> Result<ActionOutcome, EngineError> {
        let item = throwable_item(&self.item_name).ok_or_else(|| EngineError::UnknownItem {
            name: self.item_name.clone(),
        })?;
        let mut outcome = ActionOutcome::default();
        outcome.events.push(CombatEvent::ItemUsed {
            actor_id: self.actor_id.clone(),
            item_name: self.item_name.clone(),
            target_ids: self.target_ids.clone(),
        });
        for target_id in &self.target_ids {
            let Some(target) = ctx.combatant(target_id) else {
                continue;
            };
            if !target.is_alive() {
                continue;
            }
            let amount = dice.roll(item.damage_die)?.total_with_modifier.max(0);
            outcome.effects.push(Effect::Damage {
                source_id: self.actor_id.clone(),
                target_id: target_id.clone(),
                amount,
            });
        }
        Ok(outcome)
    }
}
