//! Tactical providers: policy for auto-resolved turns.

use crate::dice::{DiceError, DiceService};

use super::context::CombatContext;
use super::events::ActionChoice;
use super::intents::ActionIntent;

/// Chooses an intent from the available choices for a combatant whose
/// turn the engine resolves automatically (monsters by default, everyone
/// in auto-resolve mode).
///
/// Implementations must be total: given a non-empty choice list they
/// always return one of its intents.
pub trait TacticalProvider {
    fn choose_intent(
        &self,
        combatant_id: &str,
        choices: &[ActionChoice],
        ctx: &CombatContext,
        dice: &dyn DiceService,
    ) -> Result<ActionIntent, DiceError>;
}

/// Default policy: pick uniformly at random through the dice service.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomProvider;

impl TacticalProvider for RandomProvider {
    fn choose_intent(
        &self,
        _combatant_id: &str,
        choices: &[ActionChoice],
        _ctx: &CombatContext,
        dice: &dyn DiceService,
    ) -> Result<ActionIntent, DiceError> {
        // A single choice costs no roll, keeping fixed-dice scripts short.
        let idx = if choices.len() > 1 {
            let roll = dice.roll(&format!("1d{}", choices.len()))?;
            (roll.total.clamp(1, choices.len() as i32) - 1) as usize
        } else {
            0
        };
        Ok(choices[idx].intent.clone())
    }
}
