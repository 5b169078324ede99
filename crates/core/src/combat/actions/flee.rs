//! Fleeing the encounter.

use crate::dice::DiceService;

use super::super::context::CombatContext;
use super::super::effects::Effect;
use super::super::engine::EngineError;
use super::super::events::Rejection;
use super::{ActionOutcome, check_actor};

/// Leave the fight. No resolution roll; the flee effect marks the
/// combatant and the living-combatant queries stop seeing them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FleeAction {
    pub actor_id: String,
}

impl FleeAction {
    pub fn validate(&self, ctx: &CombatContext) -> Vec<Rejection> {
        match check_actor(ctx, &self.actor_id) {
            Some(rejection) => vec![rejection],
            None => Vec::new(),
        }
    }

    pub fn execute(
        &self,
        _ctx: &CombatContext,
        _dice: &dyn DiceService,
    ) -> Result<ActionOutcome, EngineError> {
        Ok(ActionOutcome {
            events: Vec::new(),
            effects: vec![Effect::Flee {
                target_id: self.actor_id.clone(),
            }],
        })
    }
}
