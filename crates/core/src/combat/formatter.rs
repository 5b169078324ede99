//! Human-readable log lines for combat events.
//!
//! One line per event, in the voice the adventure log and the narration
//! layer both consume.

use super::context::display_name;
use super::events::CombatEvent;
use super::state::EncounterOutcome;

/// Formats combat events into log lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct EventFormatter;

impl EventFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Return a single-line string for the event.
    pub fn format(&self, event: &CombatEvent) -> String {
        match event {
            CombatEvent::EncounterStarted { encounter_id } => {
                format!("Encounter {encounter_id} started.")
            }
            CombatEvent::SurpriseRolled {
                pc_roll,
                monster_roll,
                pc_surprised,
                monster_surprised,
            } => {
                if *pc_surprised {
                    format!("PCs are surprised! (PC roll: {pc_roll}, Monster roll: {monster_roll})")
                } else if *monster_surprised {
                    format!(
                        "Monsters are surprised! (PC roll: {pc_roll}, Monster roll: {monster_roll})"
                    )
                } else {
                    format!("No surprise. (PC roll: {pc_roll}, Monster roll: {monster_roll})")
                }
            }
            CombatEvent::RoundStarted { round_number } => {
                format!("Starting combat round {round_number}...")
            }
            CombatEvent::InitiativeRolled { order } => {
                let parts: Vec<String> = order
                    .iter()
                    .map(|(id, roll)| format!("{}={}", display_name(id), roll))
                    .collect();
                format!("Initiative: {}", parts.join(", "))
            }
            CombatEvent::TurnQueueBuilt { queue } => {
                let names: Vec<String> = queue.iter().map(|id| display_name(id)).collect();
                format!("Turn order: {}", names.join(", "))
            }
            CombatEvent::TurnStarted { combatant_id } => {
                format!("{}'s turn.", display_name(combatant_id))
            }
            CombatEvent::TurnSkipped {
                combatant_id,
                reason,
            } => format!("{}'s turn skipped ({reason}).", display_name(combatant_id)),
            CombatEvent::NeedAction {
                combatant_id,
                available,
            } => {
                let labels: Vec<String> = available.iter().map(|c| c.label()).collect();
                format!(
                    "Awaiting action for {}: {}",
                    display_name(combatant_id),
                    labels.join(", ")
                )
            }
            CombatEvent::ForcedIntentQueued {
                combatant_id,
                reason,
                ..
            } => format!(
                "{} will be forced to act ({reason}).",
                display_name(combatant_id)
            ),
            CombatEvent::ForcedIntentApplied { combatant_id, .. } => {
                format!("{} acts under compulsion.", display_name(combatant_id))
            }
            CombatEvent::ActionRejected {
                combatant_id,
                reasons,
            } => {
                let text: Vec<&str> = reasons.iter().map(|r| r.message.as_str()).collect();
                format!(
                    "Action rejected for {}: {}",
                    display_name(combatant_id),
                    text.join("; ")
                )
            }
            CombatEvent::AttackRolled {
                attacker_id,
                defender_id,
                total,
                needed,
                hit,
                critical,
                ..
            } => {
                let result = if *hit { "HIT" } else { "MISS" };
                let crit = if *critical { " CRITICAL HIT!" } else { "" };
                format!(
                    "{} attacked {} (rolled {total}, needed {needed}): {result}{crit}",
                    display_name(attacker_id),
                    display_name(defender_id)
                )
            }
            CombatEvent::SpellCast {
                caster_id,
                spell_name,
                target_ids,
                ..
            } => {
                let targets: Vec<String> = target_ids.iter().map(|id| display_name(id)).collect();
                if targets.is_empty() {
                    format!("{} casts {spell_name}.", display_name(caster_id))
                } else {
                    format!(
                        "{} casts {spell_name} at {}.",
                        display_name(caster_id),
                        targets.join(", ")
                    )
                }
            }
            CombatEvent::SavingThrowRolled {
                target_id,
                save_type,
                target_number,
                roll,
                success,
                spell_name,
                ..
            } => {
                let result = if *success { "saved" } else { "failed" };
                format!(
                    "{} rolled {roll} vs {target_number} ({save_type}) against {spell_name}: {result}.",
                    display_name(target_id)
                )
            }
            CombatEvent::GroupTargetsResolved {
                spell_name,
                resolved_target_ids,
                ..
            } => {
                let names: Vec<String> =
                    resolved_target_ids.iter().map(|id| display_name(id)).collect();
                if names.is_empty() {
                    format!("{spell_name} finds no valid targets.")
                } else {
                    format!("{spell_name} affects {}.", names.join(", "))
                }
            }
            CombatEvent::ItemUsed {
                actor_id,
                item_name,
                target_ids,
            } => {
                let targets: Vec<String> = target_ids.iter().map(|id| display_name(id)).collect();
                format!(
                    "{} throws {item_name} at {}.",
                    display_name(actor_id),
                    targets.join(", ")
                )
            }
            CombatEvent::TurnUndeadAttempted {
                actor_id,
                roll,
                target_number,
                result,
            } => match target_number {
                Some(needed) => format!(
                    "{} attempts to turn undead (rolled {roll}, needed {needed}): {result}.",
                    display_name(actor_id)
                ),
                None => format!("{} attempts to turn undead: {result}.", display_name(actor_id)),
            },
            CombatEvent::UndeadTurned {
                target_id,
                destroyed,
                ..
            } => {
                if *destroyed {
                    format!("{} is destroyed!", display_name(target_id))
                } else {
                    format!("{} is turned!", display_name(target_id))
                }
            }
            CombatEvent::DamageApplied {
                source_id,
                target_id,
                amount,
                target_hp_after,
            } => format!(
                "{} dealt {amount} damage to {} (HP: {target_hp_after}).",
                display_name(source_id),
                display_name(target_id)
            ),
            CombatEvent::HealingApplied {
                source_id,
                target_id,
                amount,
                target_hp_after,
            } => format!(
                "{} healed {} for {amount} (HP: {target_hp_after}).",
                display_name(source_id),
                display_name(target_id)
            ),
            CombatEvent::SpellSlotConsumed {
                caster_id,
                level,
                remaining,
            } => format!(
                "{} used a level {level} spell slot ({remaining} remaining).",
                display_name(caster_id)
            ),
            CombatEvent::ConditionApplied {
                source_id,
                target_id,
                condition_id,
                duration,
            } => {
                let duration_text = match duration {
                    Some(rounds) => format!("{rounds} rounds"),
                    None => "permanent".to_string(),
                };
                format!(
                    "{} applied {condition_id} to {} ({duration_text}).",
                    display_name(source_id),
                    display_name(target_id)
                )
            }
            CombatEvent::ConditionExpired {
                combatant_id,
                condition_id,
                reason,
            } => format!(
                "{} is no longer {condition_id} ({reason}).",
                display_name(combatant_id)
            ),
            CombatEvent::ModifierApplied {
                target_id,
                modifier_id,
                value,
                ..
            } => {
                let sign = if *value >= 0 { "+" } else { "" };
                format!(
                    "{} gains {modifier_id} ({sign}{value}).",
                    display_name(target_id)
                )
            }
            CombatEvent::ModifierExpired {
                combatant_id,
                modifier_id,
            } => format!("{}'s {modifier_id} wears off.", display_name(combatant_id)),
            CombatEvent::EntityDied { entity_id } => {
                format!("{} falls!", display_name(entity_id))
            }
            CombatEvent::EntityFled { entity_id } => {
                format!("{} flees!", display_name(entity_id))
            }
            CombatEvent::MoraleChecked {
                monster_morale,
                roll,
                passed,
                trigger,
                ..
            } => {
                let result = if *passed { "passed" } else { "failed" };
                format!(
                    "Morale check ({}): rolled {roll} vs {monster_morale} - {result}.",
                    trigger.replace('_', " ")
                )
            }
            CombatEvent::VictoryDetermined { outcome } => match outcome {
                EncounterOutcome::PartyVictory => "The party is victorious!".to_string(),
                EncounterOutcome::OppositionVictory => "The party has been defeated.".to_string(),
                EncounterOutcome::Faulted => "Encounter ended in a fault.".to_string(),
            },
            CombatEvent::EncounterFaulted {
                state,
                error_type,
                message,
            } => format!("FAULT in {state}: [{error_type}] {message}"),
        }
    }

    /// Format a sequence of events, one per line.
    pub fn format_all(&self, events: &[CombatEvent]) -> String {
        events
            .iter()
            .map(|e| self.format(e))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
