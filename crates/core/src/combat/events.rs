//! Typed events emitted by the combat engine.
//!
//! The event stream is the engine's sole observation surface: the
//! concatenation of every step's batch is the canonical log of an
//! encounter. Events serialize as `{"kind": <variant>, ...fields}` with
//! enum fields rendered as string names.

use std::collections::BTreeMap;

use crate::entity::AttackType;

use super::intents::ActionIntent;
use super::modifiers::ModifiedStat;
use super::state::{EncounterOutcome, EncounterState};

/// Outcome of a Turn Undead attempt.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnResult {
    Impossible,
    Failed,
    Turned,
    Destroyed,
}

/// Stable identifiers for action validation and execution failures.
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
pub enum RejectionCode {
    NoIntent,
    UnsupportedIntent,
    InvalidActor,
    NotCurrentCombatant,
    ActorDead,
    InvalidTarget,
    TargetNotOpponent,
    NoSpellSlot,
    NoRangedWeapon,
    UnknownSpell,
    UnknownEffectType,
    NoValidatedAction,
    IneligibleCaster,
    SlotLevelMismatch,
    MonsterActionNotSupported,
    TargetNotAlly,
    ItemNotThrowable,
    ItemNotInInventory,
}

/// Structured reason for an action rejection.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rejection {
    pub code: RejectionCode,
    pub message: String,
}

impl Rejection {
    pub fn new(code: RejectionCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// A UI-facing actionable choice for the active combatant.
///
/// `ui_args` is a small ordered map used for label rendering and UI
/// dispatch; the label is a pure function of `ui_key` and `ui_args`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActionChoice {
    pub ui_key: String,
    pub ui_args: BTreeMap<String, String>,
    pub intent: ActionIntent,
}

impl ActionChoice {
    pub fn new(
        ui_key: &str,
        ui_args: impl IntoIterator<Item = (String, String)>,
        intent: ActionIntent,
    ) -> Self {
        Self {
            ui_key: ui_key.to_string(),
            ui_args: ui_args.into_iter().collect(),
            intent,
        }
    }

    /// Human-readable label derived from `ui_key` and `ui_args`.
    pub fn label(&self) -> String {
        render_choice_label(&self.ui_key, &self.ui_args)
    }
}

/// Render a label from structured action-choice data.
pub fn render_choice_label(ui_key: &str, ui_args: &BTreeMap<String, String>) -> String {
    let arg = |key: &str| ui_args.get(key).map(String::as_str);
    let target = || arg("target_name").or_else(|| arg("target_id")).unwrap_or("???");
    match ui_key {
        "attack_target" => format!("Attack {}", target()),
        "ranged_attack_target" => format!("Ranged: {}", target()),
        "cast_spell" => {
            let spell = arg("spell_name").or_else(|| arg("spell_id")).unwrap_or("???");
            let mut label = match arg("target_name") {
                Some(target) if !target.is_empty() => format!("Cast {spell} on {target}"),
                _ => format!("Cast {spell}"),
            };
            if let Some(dice) = arg("group_dice") {
                label.push_str(&format!(" ({dice})"));
            }
            label
        }
        "use_item" => {
            let item = arg("item_name").unwrap_or("???");
            match arg("target_name") {
                Some(target) if !target.is_empty() => format!("Throw {item} at {target}"),
                _ => format!("Use {item}"),
            }
        }
        "turn_undead" => "Turn undead".to_string(),
        "flee" => "Flee".to_string(),
        _ => ui_key.to_string(),
    }
}

/// Everything the engine can tell the outside world.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind")]
pub enum CombatEvent {
    EncounterStarted {
        encounter_id: String,
    },
    SurpriseRolled {
        pc_roll: i32,
        monster_roll: i32,
        pc_surprised: bool,
        monster_surprised: bool,
    },
    RoundStarted {
        round_number: u32,
    },
    InitiativeRolled {
        order: Vec<(String, i32)>,
    },
    TurnQueueBuilt {
        queue: Vec<String>,
    },
    TurnStarted {
        combatant_id: String,
    },
    TurnSkipped {
        combatant_id: String,
        reason: String,
    },
    NeedAction {
        combatant_id: String,
        available: Vec<ActionChoice>,
    },
    ForcedIntentQueued {
        combatant_id: String,
        intent: ActionIntent,
        reason: String,
    },
    ForcedIntentApplied {
        combatant_id: String,
        intent: ActionIntent,
    },
    ActionRejected {
        combatant_id: String,
        reasons: Vec<Rejection>,
    },
    AttackRolled {
        attacker_id: String,
        defender_id: String,
        roll: i32,
        total: i32,
        needed: i32,
        hit: bool,
        critical: bool,
    },
    SpellCast {
        caster_id: String,
        spell_id: String,
        spell_name: String,
        target_ids: Vec<String>,
    },
    SavingThrowRolled {
        target_id: String,
        save_type: AttackType,
        target_number: i32,
        roll: i32,
        success: bool,
        spell_name: String,
        penalty: i32,
    },
    GroupTargetsResolved {
        spell_name: String,
        pool_roll: Option<i32>,
        resolved_target_ids: Vec<String>,
    },
    ItemUsed {
        actor_id: String,
        item_name: String,
        target_ids: Vec<String>,
    },
    TurnUndeadAttempted {
        actor_id: String,
        roll: i32,
        target_number: Option<i32>,
        result: TurnResult,
    },
    UndeadTurned {
        actor_id: String,
        target_id: String,
        destroyed: bool,
        hd_spent: u32,
    },
    DamageApplied {
        source_id: String,
        target_id: String,
        amount: i32,
        target_hp_after: i32,
    },
    HealingApplied {
        source_id: String,
        target_id: String,
        amount: i32,
        target_hp_after: i32,
    },
    SpellSlotConsumed {
        caster_id: String,
        level: u8,
        remaining: u32,
    },
    ConditionApplied {
        source_id: String,
        target_id: String,
        condition_id: String,
        duration: Option<u32>,
    },
    ConditionExpired {
        combatant_id: String,
        condition_id: String,
        /// `"duration"`, `"damage"`, or `"dispelled"`.
        reason: String,
    },
    ModifierApplied {
        source_id: String,
        target_id: String,
        modifier_id: String,
        stat: ModifiedStat,
        value: i32,
        duration: Option<u32>,
    },
    ModifierExpired {
        combatant_id: String,
        modifier_id: String,
    },
    EntityDied {
        entity_id: String,
    },
    EntityFled {
        entity_id: String,
    },
    MoraleChecked {
        monster_morale: u8,
        roll: i32,
        modifier: i32,
        passed: bool,
        /// `"first_death"` or `"half_incapacitated"`.
        trigger: String,
        checks_passed_total: u8,
        now_immune: bool,
    },
    VictoryDetermined {
        outcome: EncounterOutcome,
    },
    EncounterFaulted {
        state: EncounterState,
        error_type: String,
        message: String,
    },
}
