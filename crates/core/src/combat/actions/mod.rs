//! Validated combat actions.
//!
//! Every intent variant maps to an action here. Actions are pure over the
//! context: `validate` reports structured rejections, and `execute`
//! resolves rolls into events plus a deferred effect list without mutating
//! anything.

mod flee;
mod item;
mod melee;
mod ranged;
mod spell;
mod turn_undead;

pub use flee::FleeAction;
pub use item::UseItemAction;
pub use melee::MeleeAttackAction;
pub use ranged::RangedAttackAction;
pub use spell::CastSpellAction;
pub use turn_undead::TurnUndeadAction;

use crate::dice::DiceService;

use super::context::{CombatContext, CombatSide};
use super::effects::Effect;
use super::engine::EngineError;
use super::events::{CombatEvent, Rejection, RejectionCode};
use super::intents::ActionIntent;

/// Pure action output: resolution events plus deferred mutation effects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionOutcome {
    pub events: Vec<CombatEvent>,
    pub effects: Vec<Effect>,
}

/// A validated resolver for one intent variant.
#[derive(Clone, Debug, PartialEq)]
pub enum CombatAction {
    MeleeAttack(MeleeAttackAction),
    RangedAttack(RangedAttackAction),
    CastSpell(CastSpellAction),
    UseItem(UseItemAction),
    TurnUndead(TurnUndeadAction),
    Flee(FleeAction),
}

impl CombatAction {
    /// Map an intent to its action. Every current intent variant is
    /// supported; `None` is reserved for future intent kinds so the
    /// engine's `UNSUPPORTED_INTENT` rejection stays reachable.
    pub fn from_intent(intent: &ActionIntent) -> Option<Self> {
        Some(match intent {
            ActionIntent::MeleeAttack { actor_id, target_id } => {
                Self::MeleeAttack(MeleeAttackAction {
                    actor_id: actor_id.clone(),
                    target_id: target_id.clone(),
                })
            }
            ActionIntent::RangedAttack { actor_id, target_id } => {
                Self::RangedAttack(RangedAttackAction {
                    actor_id: actor_id.clone(),
                    target_id: target_id.clone(),
                })
            }
            ActionIntent::CastSpell {
                actor_id,
                spell_id,
                slot_level,
                target_ids,
            } => Self::CastSpell(CastSpellAction {
                actor_id: actor_id.clone(),
                spell_id: spell_id.clone(),
                slot_level: *slot_level,
                target_ids: target_ids.clone(),
            }),
            ActionIntent::UseItem {
                actor_id,
                item_name,
                target_ids,
            } => Self::UseItem(UseItemAction {
                actor_id: actor_id.clone(),
                item_name: item_name.clone(),
                target_ids: target_ids.clone(),
            }),
            ActionIntent::TurnUndead { actor_id } => Self::TurnUndead(TurnUndeadAction {
                actor_id: actor_id.clone(),
            }),
            ActionIntent::Flee { actor_id } => Self::Flee(FleeAction {
                actor_id: actor_id.clone(),
            }),
        })
    }

    pub fn actor_id(&self) -> &str {
        match self {
            Self::MeleeAttack(a) => &a.actor_id,
            Self::RangedAttack(a) => &a.actor_id,
            Self::CastSpell(a) => &a.actor_id,
            Self::UseItem(a) => &a.actor_id,
            Self::TurnUndead(a) => &a.actor_id,
            Self::Flee(a) => &a.actor_id,
        }
    }

    /// Check the action against the context. Empty means legal.
    pub fn validate(&self, ctx: &CombatContext) -> Vec<Rejection> {
        match self {
            Self::MeleeAttack(a) => a.validate(ctx),
            Self::RangedAttack(a) => a.validate(ctx),
            Self::CastSpell(a) => a.validate(ctx),
            Self::UseItem(a) => a.validate(ctx),
            Self::TurnUndead(a) => a.validate(ctx),
            Self::Flee(a) => a.validate(ctx),
        }
    }

    /// Resolve the action into events and deferred effects.
    pub fn execute(
        &self,
        ctx: &CombatContext,
        dice: &dyn DiceService,
    ) -> Result<ActionOutcome, EngineError> {
        match self {
            Self::MeleeAttack(a) => a.execute(ctx, dice),
            Self::RangedAttack(a) => a.execute(ctx, dice),
            Self::CastSpell(a) => a.execute(ctx, dice),
            Self::UseItem(a) => a.execute(ctx, dice),
            Self::TurnUndead(a) => a.execute(ctx, dice),
            Self::Flee(a) => a.execute(ctx, dice),
        }
    }
}

/// Shared actor checks: registered, current, and alive.
pub(crate) fn check_actor(ctx: &CombatContext, actor_id: &str) -> Option<Rejection> {
    let Some(actor) = ctx.combatant(actor_id) else {
        return Some(Rejection::new(RejectionCode::InvalidActor, "actor is invalid"));
    };
    if ctx.current_combatant_id.as_deref() != Some(actor_id) {
        return Some(Rejection::new(
            RejectionCode::NotCurrentCombatant,
            format!(
                "not current combatant (expected {})",
                ctx.current_combatant_id.as_deref().unwrap_or("none")
            ),
        ));
    }
    if !actor.is_alive() {
        return Some(Rejection::new(RejectionCode::ActorDead, "actor is dead"));
    }
    None
}

/// Shared target checks: registered, alive, and on the opposite side.
pub(crate) fn check_enemy_target(
    ctx: &CombatContext,
    actor_side: CombatSide,
    target_id: &str,
) -> Option<Rejection> {
    match ctx.combatant(target_id) {
        None => Some(Rejection::new(
            RejectionCode::InvalidTarget,
            "target is dead or invalid",
        )),
        Some(target) if !target.is_alive() => Some(Rejection::new(
            RejectionCode::InvalidTarget,
            "target is dead or invalid",
        )),
        Some(target) if target.side == actor_side => Some(Rejection::new(
            RejectionCode::TargetNotOpponent,
            "target must be an opponent",
        )),
        Some(_) => None,
    }
}
