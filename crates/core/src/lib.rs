//! Deterministic B/X-style tactical combat engine.
//!
//! `skirmish-core` defines the canonical combat rules: dice, entities, and
//! the encounter state machine that turns `(state, intent?)` into
//! `(state', events)`. All mutation flows through [`combat::CombatEngine`],
//! and the surrounding application observes the encounter exclusively
//! through the typed event stream.
pub mod combat;
pub mod dice;
pub mod entity;

pub use combat::{
    ActionChoice, ActionIntent, ActionOutcome, ActiveCondition, ActiveModifier, AttackType,
    CombatAction, CombatContext, CombatEngine, CombatEngineBuilder, CombatEvent, CombatSide,
    CombatView, CombatantRef, CombatantView, ConditionTracker, EncounterOutcome, EncounterState,
    Effect, EngineError, EventFormatter, EventSerializer, ModifiedStat, ModifierTracker,
    MoraleState, RandomProvider, Rejection, RejectionCode, SpellDefinition, StepResult,
    TacticalProvider, TargetMode, TurnResult, get_spell, throwable_item,
};
pub use dice::{BxDiceService, DiceError, DiceRoll, DiceService, FixedDiceService};
pub use entity::{
    AbilityScores, Alignment, CharacterClassType, Entity, Loadout, Monster, MonsterParty,
    MonsterStatsBlock, Party, PlayerCharacter, Weapon,
};
