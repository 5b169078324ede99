//! The encounter state machine.
//!
//! [`CombatEngine`] is the authoritative reducer for an encounter. Call
//! [`CombatEngine::step`] repeatedly to advance combat one transition at a
//! time, or [`CombatEngine::step_until_decision`] to run until the engine
//! needs an external intent (or combat ends).
//!
//! By default the engine auto-resolves intents for all combatants through
//! its tactical provider, so stepping in a loop until `ENDED` runs a full
//! encounter. Build with `auto_resolve_intents(false)` to pause at
//! `AWAIT_INTENT` and require external intent submission for player
//! characters.

mod errors;

pub use errors::EngineError;

use rand::Rng;

use crate::dice::{BxDiceService, DiceService};
use crate::entity::{MonsterParty, Party};

use super::actions::CombatAction;
use super::choices::build_choices;
use super::conditions::ActiveCondition;
use super::context::{CombatContext, CombatSide};
use super::effects::Effect;
use super::events::{CombatEvent, Rejection, RejectionCode};
use super::intents::ActionIntent;
use super::modifiers::ActiveModifier;
use super::provider::{RandomProvider, TacticalProvider};
use super::state::{EncounterOutcome, EncounterState};
use super::view::{CombatView, CombatantView};

/// Value returned by each [`CombatEngine::step`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    pub state: EncounterState,
    pub needs_intent: bool,
    pub pending_combatant_id: Option<String>,
    pub events: Vec<CombatEvent>,
}

/// Builder for [`CombatEngine`].
pub struct CombatEngineBuilder {
    pc_party: Party,
    monster_party: MonsterParty,
    dice: Option<Box<dyn DiceService>>,
    auto_resolve_intents: bool,
    tactical_provider: Option<Box<dyn TacticalProvider>>,
    encounter_id: Option<String>,
}

impl CombatEngineBuilder {
    pub fn dice(mut self, dice: impl DiceService + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    /// When `false`, the engine pauses at `AWAIT_INTENT` on player turns.
    pub fn auto_resolve_intents(mut self, auto: bool) -> Self {
        self.auto_resolve_intents = auto;
        self
    }

    pub fn tactical_provider(mut self, provider: impl TacticalProvider + 'static) -> Self {
        self.tactical_provider = Some(Box::new(provider));
        self
    }

    /// Pin the encounter id (normally random), making full runs under a
    /// fixed dice service byte-identical.
    pub fn encounter_id(mut self, id: &str) -> Self {
        self.encounter_id = Some(id.to_string());
        self
    }

    pub fn build(self) -> CombatEngine {
        CombatEngine {
            ctx: CombatContext::build(self.pc_party, self.monster_party),
            dice: self.dice.unwrap_or_else(|| Box::new(BxDiceService::new())),
            auto_resolve_intents: self.auto_resolve_intents,
            provider: self
                .tactical_provider
                .unwrap_or_else(|| Box::new(RandomProvider)),
            state: EncounterState::Init,
            encounter_id: self.encounter_id.unwrap_or_else(random_encounter_id),
            outcome: None,
            pending_intent: None,
            validated_action: None,
            pending_effects: Vec::new(),
            forced_intent_active: false,
            deferred_events: Vec::new(),
        }
    }
}

fn random_encounter_id() -> String {
    let mut rng = rand::rng();
    (0..12)
        .map(|_| char::from_digit(rng.random_range(0..16), 16).unwrap_or('0'))
        .collect()
}

/// State-machine combat engine.
pub struct CombatEngine {
    ctx: CombatContext,
    dice: Box<dyn DiceService>,
    auto_resolve_intents: bool,
    provider: Box<dyn TacticalProvider>,
    state: EncounterState,
    encounter_id: String,
    outcome: Option<EncounterOutcome>,
    pending_intent: Option<ActionIntent>,
    validated_action: Option<CombatAction>,
    pending_effects: Vec<Effect>,
    forced_intent_active: bool,
    deferred_events: Vec<CombatEvent>,
}

impl CombatEngine {
    /// Engine with production defaults: real dice, auto-resolved intents,
    /// uniform random tactical provider.
    pub fn new(pc_party: Party, monster_party: MonsterParty) -> Self {
        Self::builder(pc_party, monster_party).build()
    }

    pub fn builder(pc_party: Party, monster_party: MonsterParty) -> CombatEngineBuilder {
        CombatEngineBuilder {
            pc_party,
            monster_party,
            dice: None,
            auto_resolve_intents: true,
            tactical_provider: None,
            encounter_id: None,
        }
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn outcome(&self) -> Option<EncounterOutcome> {
        self.outcome
    }

    pub fn encounter_id(&self) -> &str {
        &self.encounter_id
    }

    /// Read-only access to the encounter state bag.
    pub fn context(&self) -> &CombatContext {
        &self.ctx
    }

    /// Mutable access for the host between steps (pre-encounter healing,
    /// scripted adjustments). Never call from inside an event callback.
    pub fn context_mut(&mut self) -> &mut CombatContext {
        &mut self.ctx
    }

    /// Frozen snapshot of the current combat state for UI consumption.
    pub fn get_view(&self) -> CombatView {
        let combatants = self
            .ctx
            .combatants()
            .iter()
            .map(|c| CombatantView {
                id: c.id.clone(),
                name: c.name().to_string(),
                side: c.side,
                hp: c.entity.hit_points(),
                max_hp: c.entity.max_hit_points(),
                armor_class: c.armor_class(),
                is_alive: c.is_alive(),
                has_fled: c.has_fled,
                conditions: self
                    .ctx
                    .conditions
                    .get_all(&c.id)
                    .iter()
                    .map(|cond| cond.condition_id.clone())
                    .collect(),
            })
            .collect();
        CombatView {
            round_number: self.ctx.round_number,
            current_combatant_id: self.ctx.current_combatant_id.clone(),
            combatants,
            announced_deaths: self.ctx.announced_deaths.clone(),
        }
    }

    /// Queue a forced intent that bypasses `AWAIT_INTENT` on the
    /// combatant's next turn. The returned `ForcedIntentQueued` event is
    /// also emitted at the head of the next `step()`'s batch.
    pub fn queue_forced_intent(
        &mut self,
        combatant_id: &str,
        intent: ActionIntent,
        reason: &str,
    ) -> Result<CombatEvent, EngineError> {
        if self.state == EncounterState::Ended {
            return Err(EngineError::EncounterEnded);
        }
        Ok(self.push_forced_intent(combatant_id, intent, reason))
    }

    fn push_forced_intent(
        &mut self,
        combatant_id: &str,
        intent: ActionIntent,
        reason: &str,
    ) -> CombatEvent {
        self.ctx
            .forced_intents
            .insert(combatant_id.to_string(), intent.clone());
        let event = CombatEvent::ForcedIntentQueued {
            combatant_id: combatant_id.to_string(),
            intent,
            reason: reason.to_string(),
        };
        self.deferred_events.push(event.clone());
        event
    }

    /// Execute a single state transition and return the result.
    ///
    /// Stepping an `ENDED` engine is a safe no-op: the outcome is
    /// preserved and no events are emitted.
    pub fn step(&mut self, intent: Option<ActionIntent>) -> StepResult {
        if self.state == EncounterState::Ended {
            return StepResult {
                state: EncounterState::Ended,
                needs_intent: false,
                pending_combatant_id: None,
                events: Vec::new(),
            };
        }
        if let Some(intent) = intent {
            self.pending_intent = Some(intent);
        }

        let mut events = std::mem::take(&mut self.deferred_events);
        let entered = self.state;
        if let Err(error) = self.dispatch(&mut events) {
            tracing::debug!(state = %entered, error = %error, "encounter faulted");
            events.push(CombatEvent::EncounterFaulted {
                state: entered,
                error_type: error.error_type().to_string(),
                message: error.to_string(),
            });
            self.outcome = Some(EncounterOutcome::Faulted);
            self.state = EncounterState::Ended;
        }

        StepResult {
            state: self.state,
            needs_intent: self.state == EncounterState::AwaitIntent,
            pending_combatant_id: self.ctx.current_combatant_id.clone(),
            events,
        }
    }

    /// Advance until the engine needs an intent or combat ends, returning
    /// every step result produced along the way.
    ///
    /// The supplied intent is consumed by the first step only. If
    /// `max_steps` is exhausted first, the engine faults into `ENDED` and
    /// this returns [`EngineError::LoopExhausted`].
    pub fn step_until_decision(
        &mut self,
        intent: Option<ActionIntent>,
        max_steps: u32,
    ) -> Result<Vec<StepResult>, EngineError> {
        let mut intent = intent;
        let mut results = Vec::new();
        for _ in 0..max_steps {
            let result = self.step(intent.take());
            let done = result.needs_intent || result.state == EncounterState::Ended;
            results.push(result);
            if done {
                return Ok(results);
            }
        }
        // Fault the engine into a safe terminal state before reporting.
        self.outcome = Some(EncounterOutcome::Faulted);
        self.state = EncounterState::Ended;
        Err(EngineError::LoopExhausted { max_steps })
    }

    fn dispatch(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), EngineError> {
        match self.state {
            EncounterState::Init => self.handle_init(events),
            EncounterState::RoundStart => self.handle_round_start(events),
            EncounterState::TurnStart => self.handle_turn_start(events),
            EncounterState::AwaitIntent => {
                if self.pending_intent.is_some() {
                    self.state = EncounterState::ValidateIntent;
                }
                Ok(())
            }
            EncounterState::ValidateIntent => self.handle_validate_intent(events),
            EncounterState::ExecuteAction => self.handle_execute_action(events),
            EncounterState::ApplyEffects => self.handle_apply_effects(events),
            EncounterState::CheckDeaths => self.handle_check_deaths(events),
            EncounterState::CheckMorale => self.handle_check_morale(events),
            EncounterState::CheckVictory => self.handle_check_victory(events),
            EncounterState::Ended => Ok(()),
        }
    }

    fn handle_init(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), EngineError> {
        events.push(CombatEvent::EncounterStarted {
            encounter_id: self.encounter_id.clone(),
        });

        let pc_roll = self.dice.roll("1d6")?.total_with_modifier;
        let monster_roll = self.dice.roll("1d6")?.total_with_modifier;
        let pc_surprised = monster_roll > pc_roll;
        let monster_surprised = pc_roll > monster_roll;
        self.ctx.pcs_surprised = pc_surprised;
        self.ctx.monsters_surprised = monster_surprised;
        events.push(CombatEvent::SurpriseRolled {
            pc_roll,
            monster_roll,
            pc_surprised,
            monster_surprised,
        });

        self.state = EncounterState::RoundStart;
        Ok(())
    }

    fn handle_round_start(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), EngineError> {
        self.ctx.round_number += 1;
        tracing::debug!(round = self.ctx.round_number, "round start");
        events.push(CombatEvent::RoundStarted {
            round_number: self.ctx.round_number,
        });

        for (combatant_id, condition_id) in self.ctx.conditions.tick_round() {
            events.push(CombatEvent::ConditionExpired {
                combatant_id,
                condition_id,
                reason: "duration".to_string(),
            });
        }
        for (combatant_id, modifier_id) in self.ctx.modifiers.tick_round() {
            events.push(CombatEvent::ModifierExpired {
                combatant_id,
                modifier_id,
            });
        }

        // Initiative for every living, non-fled combatant; stable sort
        // keeps registration order on ties.
        let mut initiative: Vec<(String, i32)> = Vec::new();
        let dice = self.dice.as_ref();
        for combatant in self.ctx.combatants() {
            if combatant.is_alive() && !combatant.has_fled {
                initiative.push((combatant.id.clone(), combatant.entity.initiative_roll(dice)?));
            }
        }
        initiative.sort_by(|a, b| b.1.cmp(&a.1));
        events.push(CombatEvent::InitiativeRolled {
            order: initiative.clone(),
        });

        self.ctx.turn_queue = initiative.iter().map(|(id, _)| id.clone()).collect();
        events.push(CombatEvent::TurnQueueBuilt {
            queue: self.ctx.turn_queue.iter().cloned().collect(),
        });

        self.state = EncounterState::TurnStart;
        Ok(())
    }

    fn handle_turn_start(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), EngineError> {
        let Some(combatant_id) = self.ctx.turn_queue.pop_front() else {
            self.ctx.current_combatant_id = None;
            self.state = EncounterState::CheckVictory;
            return Ok(());
        };
        self.ctx.current_combatant_id = Some(combatant_id.clone());

        let combatant =
            self.ctx
                .combatant(&combatant_id)
                .ok_or_else(|| EngineError::UnknownCombatant {
                    id: combatant_id.clone(),
                })?;
        if !combatant.is_alive() {
            events.push(CombatEvent::TurnSkipped {
                combatant_id,
                reason: "dead".to_string(),
            });
            return Ok(());
        }
        if combatant.has_fled {
            events.push(CombatEvent::TurnSkipped {
                combatant_id,
                reason: "fled".to_string(),
            });
            return Ok(());
        }
        if let Some(reason) = self.ctx.conditions.skip_reason(&combatant_id) {
            events.push(CombatEvent::TurnSkipped {
                combatant_id,
                reason: reason.to_string(),
            });
            return Ok(());
        }

        events.push(CombatEvent::TurnStarted {
            combatant_id: combatant_id.clone(),
        });

        // Forced intents (morale flee, turned undead) bypass the normal
        // decision flow.
        if let Some(forced) = self.ctx.forced_intents.remove(&combatant_id) {
            self.pending_intent = Some(forced.clone());
            self.forced_intent_active = true;
            events.push(CombatEvent::ForcedIntentApplied {
                combatant_id,
                intent: forced,
            });
            self.state = EncounterState::ValidateIntent;
            return Ok(());
        }

        self.build_choices_or_await(&combatant_id, events)
    }

    /// Build action choices and either auto-resolve or pause for input.
    fn build_choices_or_await(
        &mut self,
        combatant_id: &str,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), EngineError> {
        let side = self
            .ctx
            .combatant(combatant_id)
            .map(|c| c.side)
            .ok_or_else(|| EngineError::UnknownCombatant {
                id: combatant_id.to_string(),
            })?;
        if self.ctx.living(side.opposite()).is_empty() {
            self.state = EncounterState::CheckVictory;
            return Ok(());
        }

        self.ctx.ensure_slot_cache(combatant_id);
        let available = build_choices(&self.ctx, combatant_id);
        if available.is_empty() {
            self.state = EncounterState::CheckVictory;
            return Ok(());
        }

        if self.auto_resolve_intents || side == CombatSide::Monster {
            let intent =
                self.provider
                    .choose_intent(combatant_id, &available, &self.ctx, self.dice.as_ref())?;
            self.pending_intent = Some(intent);
            self.state = EncounterState::ValidateIntent;
        } else {
            events.push(CombatEvent::NeedAction {
                combatant_id: combatant_id.to_string(),
                available,
            });
            self.state = EncounterState::AwaitIntent;
        }
        Ok(())
    }

    fn handle_validate_intent(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), EngineError> {
        let intent = self.pending_intent.take();
        let was_forced = std::mem::replace(&mut self.forced_intent_active, false);

        let Some(intent) = intent else {
            events.push(CombatEvent::ActionRejected {
                combatant_id: self.ctx.current_combatant_id.clone().unwrap_or_default(),
                reasons: vec![Rejection::new(RejectionCode::NoIntent, "no intent")],
            });
            self.state = EncounterState::AwaitIntent;
            return Ok(());
        };

        let Some(action) = CombatAction::from_intent(&intent) else {
            events.push(CombatEvent::ActionRejected {
                combatant_id: intent.actor_id().to_string(),
                reasons: vec![Rejection::new(
                    RejectionCode::UnsupportedIntent,
                    "unsupported intent",
                )],
            });
            return self.after_rejection(was_forced, events);
        };

        let reasons = action.validate(&self.ctx);
        if !reasons.is_empty() {
            events.push(CombatEvent::ActionRejected {
                combatant_id: intent.actor_id().to_string(),
                reasons,
            });
            return self.after_rejection(was_forced, events);
        }

        self.validated_action = Some(action);
        self.state = EncounterState::ExecuteAction;
        Ok(())
    }

    /// A rejected forced intent falls back to normal choice generation on
    /// the same combatant; a rejected external intent pauses again.
    fn after_rejection(
        &mut self,
        was_forced: bool,
        events: &mut Vec<CombatEvent>,
    ) -> Result<(), EngineError> {
        if !was_forced {
            self.state = EncounterState::AwaitIntent;
            return Ok(());
        }
        let Some(combatant_id) = self.ctx.current_combatant_id.clone() else {
            self.state = EncounterState::CheckVictory;
            return Ok(());
        };
        let alive = self
            .ctx
            .combatant(&combatant_id)
            .is_some_and(|c| c.is_alive());
        if !alive {
            self.state = EncounterState::CheckVictory;
            return Ok(());
        }
        self.build_choices_or_await(&combatant_id, events)
    }

    fn handle_execute_action(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), EngineError> {
        let Some(action) = self.validated_action.take() else {
            events.push(CombatEvent::ActionRejected {
                combatant_id: self.ctx.current_combatant_id.clone().unwrap_or_default(),
                reasons: vec![Rejection::new(
                    RejectionCode::NoValidatedAction,
                    "no validated action",
                )],
            });
            self.state = EncounterState::AwaitIntent;
            return Ok(());
        };

        let outcome = action.execute(&self.ctx, self.dice.as_ref())?;
        events.extend(outcome.events);
        self.pending_effects = outcome.effects;
        self.state = EncounterState::ApplyEffects;
        Ok(())
    }

    fn handle_apply_effects(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), EngineError> {
        let effects = std::mem::take(&mut self.pending_effects);
        // A failed slot consumption blocks the rest of the batch: the
        // spell fizzles instead of half-landing.
        let mut blocked = false;

        for effect in effects {
            match effect {
                Effect::Damage {
                    source_id,
                    target_id,
                    amount,
                } => {
                    if blocked {
                        continue;
                    }
                    if amount > 0 {
                        for condition_id in self.ctx.conditions.remove_break_on_damage(&target_id) {
                            events.push(CombatEvent::ConditionExpired {
                                combatant_id: target_id.clone(),
                                condition_id,
                                reason: "damage".to_string(),
                            });
                        }
                    }
                    let target = self.ctx.combatant_mut(&target_id).ok_or_else(|| {
                        EngineError::UnknownCombatant {
                            id: target_id.clone(),
                        }
                    })?;
                    target.entity.apply_damage(amount);
                    let target_hp_after = target.entity.hit_points();
                    events.push(CombatEvent::DamageApplied {
                        source_id,
                        target_id,
                        amount,
                        target_hp_after,
                    });
                }
                Effect::Heal {
                    source_id,
                    target_id,
                    amount,
                } => {
                    if blocked {
                        continue;
                    }
                    let target = self.ctx.combatant_mut(&target_id).ok_or_else(|| {
                        EngineError::UnknownCombatant {
                            id: target_id.clone(),
                        }
                    })?;
                    target.entity.heal(amount);
                    let target_hp_after = target.entity.hit_points();
                    events.push(CombatEvent::HealingApplied {
                        source_id,
                        target_id,
                        amount,
                        target_hp_after,
                    });
                }
                Effect::ConsumeSlot { caster_id, level } => {
                    match self.ctx.consume_spell_slot(&caster_id, level) {
                        Some(remaining) => {
                            events.push(CombatEvent::SpellSlotConsumed {
                                caster_id,
                                level,
                                remaining,
                            });
                        }
                        None => {
                            events.push(CombatEvent::ActionRejected {
                                combatant_id: caster_id,
                                reasons: vec![Rejection::new(
                                    RejectionCode::NoSpellSlot,
                                    format!("no level {level} spell slots remaining"),
                                )],
                            });
                            blocked = true;
                        }
                    }
                }
                Effect::ApplyCondition {
                    source_id,
                    target_id,
                    condition_id,
                    duration,
                } => {
                    if blocked {
                        continue;
                    }
                    self.ctx.conditions.add(
                        &target_id,
                        ActiveCondition::from_registry(&condition_id, &source_id, duration),
                    );
                    events.push(CombatEvent::ConditionApplied {
                        source_id,
                        target_id,
                        condition_id,
                        duration,
                    });
                }
                Effect::ApplyModifier {
                    source_id,
                    target_id,
                    modifier_id,
                    stat,
                    value,
                    duration,
                } => {
                    if blocked {
                        continue;
                    }
                    self.ctx.modifiers.add(
                        &target_id,
                        ActiveModifier::new(&modifier_id, &source_id, stat, value, duration),
                    );
                    events.push(CombatEvent::ModifierApplied {
                        source_id,
                        target_id,
                        modifier_id,
                        stat,
                        value,
                        duration,
                    });
                }
                Effect::Flee { target_id } => {
                    let target = self.ctx.combatant_mut(&target_id).ok_or_else(|| {
                        EngineError::UnknownCombatant {
                            id: target_id.clone(),
                        }
                    })?;
                    target.has_fled = true;
                    events.push(CombatEvent::EntityFled {
                        entity_id: target_id,
                    });
                }
            }
        }

        self.state = EncounterState::CheckDeaths;
        Ok(())
    }

    fn handle_check_deaths(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), EngineError> {
        let newly_dead: Vec<String> = self
            .ctx
            .combatants()
            .iter()
            .filter(|c| !c.is_alive() && !self.ctx.announced_deaths.contains(&c.id))
            .map(|c| c.id.clone())
            .collect();
        for entity_id in newly_dead {
            self.ctx.announced_deaths.insert(entity_id.clone());
            events.push(CombatEvent::EntityDied { entity_id });
        }
        self.state = EncounterState::CheckMorale;
        Ok(())
    }

    fn handle_check_morale(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), EngineError> {
        if self.ctx.morale.is_immune {
            self.state = EncounterState::CheckVictory;
            return Ok(());
        }

        let total = self.ctx.monster_total();
        let dead = self.ctx.monsters_dead();
        let trigger = if !self.ctx.morale.first_death_checked && dead >= 1 {
            self.ctx.morale.first_death_checked = true;
            Some("first_death")
        } else if !self.ctx.morale.half_dead_checked && total > 0 && dead * 2 >= total {
            self.ctx.morale.half_dead_checked = true;
            Some("half_incapacitated")
        } else {
            None
        };
        let Some(trigger) = trigger else {
            self.state = EncounterState::CheckVictory;
            return Ok(());
        };

        let roll = self.dice.roll("2d6")?.total_with_modifier;
        let morale_score = self.ctx.morale.morale_score;
        let passed = roll <= i32::from(morale_score);
        let now_immune = if passed {
            self.ctx.morale.record_pass()
        } else {
            false
        };
        tracing::debug!(trigger, roll, morale_score, passed, "morale check");
        events.push(CombatEvent::MoraleChecked {
            monster_morale: morale_score,
            roll,
            modifier: 0,
            passed,
            trigger: trigger.to_string(),
            checks_passed_total: self.ctx.morale.checks_passed,
            now_immune,
        });

        if !passed {
            // The whole group breaks: every living monster flees on its
            // next turn. The queued events surface in the next batch.
            let fleeing: Vec<String> = self
                .ctx
                .living(CombatSide::Monster)
                .iter()
                .map(|c| c.id.clone())
                .collect();
            for combatant_id in fleeing {
                let intent = ActionIntent::Flee {
                    actor_id: combatant_id.clone(),
                };
                self.push_forced_intent(&combatant_id, intent, "morale failure");
            }
        }

        self.state = EncounterState::CheckVictory;
        Ok(())
    }

    fn handle_check_victory(&mut self, events: &mut Vec<CombatEvent>) -> Result<(), EngineError> {
        if !self.ctx.monsters_alive() {
            events.push(CombatEvent::VictoryDetermined {
                outcome: EncounterOutcome::PartyVictory,
            });
            self.outcome = Some(EncounterOutcome::PartyVictory);
            self.state = EncounterState::Ended;
        } else if !self.ctx.pcs_alive() {
            events.push(CombatEvent::VictoryDetermined {
                outcome: EncounterOutcome::OppositionVictory,
            });
            self.outcome = Some(EncounterOutcome::OppositionVictory);
            self.state = EncounterState::Ended;
        } else if !self.ctx.turn_queue.is_empty() {
            self.state = EncounterState::TurnStart;
        } else {
            self.state = EncounterState::RoundStart;
        }
        Ok(())
    }
}
