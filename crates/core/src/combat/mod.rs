//! State-driven tactical combat.
//!
//! The encounter advances through a fixed state machine
//! (`INIT -> ROUND_START -> TURN_START -> ... -> ENDED`), emitting an
//! ordered stream of typed events and consuming externally supplied
//! intents for per-combatant decisions.

pub mod actions;
pub mod choices;
pub mod conditions;
pub mod context;
pub mod effects;
pub mod engine;
pub mod events;
pub mod formatter;
pub mod intents;
pub mod items;
pub mod modifiers;
pub mod morale;
pub mod provider;
pub mod serializer;
pub mod spells;
pub mod state;
pub mod targeting;
#[cfg(test)]
pub(crate) mod testkit;
pub mod turning;
pub mod view;

pub use actions::{
    ActionOutcome, CastSpellAction, CombatAction, FleeAction, MeleeAttackAction,
    RangedAttackAction, TurnUndeadAction, UseItemAction,
};
pub use choices::build_choices;
pub use conditions::{ActiveCondition, ConditionBehavior, ConditionTracker, condition_behavior};
pub use context::{CombatContext, CombatSide, CombatantRef, display_name};
pub use effects::Effect;
pub use engine::{CombatEngine, CombatEngineBuilder, EngineError, StepResult};
pub use events::{
    ActionChoice, CombatEvent, Rejection, RejectionCode, TurnResult, render_choice_label,
};
pub use formatter::EventFormatter;
pub use intents::ActionIntent;
pub use items::{THROWABLE_ITEMS, ThrowableItem, throwable_item};
pub use modifiers::{ActiveModifier, ModifiedStat, ModifierTracker};
pub use morale::MoraleState;
pub use provider::{RandomProvider, TacticalProvider};
pub use serializer::EventSerializer;
pub use spells::{SPELL_CATALOG, SpellDefinition, SpellModifier, TargetMode, get_spell};
pub use state::{EncounterOutcome, EncounterState};
pub use targeting::{combatant_hd, resolve_hd_pool, resolve_random_group};
pub use turning::{TurnCell, turn_cell, undead_tier};
pub use view::{CombatView, CombatantView};

// Re-export the saving-throw category where spell definitions need it.
pub use crate::entity::AttackType;
