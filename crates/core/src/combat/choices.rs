//! Choice generation: the full permissible-action list for one combatant.
//!
//! Monsters receive melee choices only; player characters get melee,
//! ranged (with a ranged weapon equipped), known spells with remaining
//! slots, throwable items, Turn Undead for clerics facing undead, and
//! always Flee last.

use std::collections::BTreeMap;

use crate::entity::{CharacterClassType, PlayerCharacter};

use super::context::{CombatContext, CombatantRef, display_name};
use super::events::ActionChoice;
use super::intents::ActionIntent;
use super::spells::{SpellDefinition, TargetMode, get_spell};
use super::targeting::combatant_hd;

fn args(pairs: Vec<(&str, String)>) -> BTreeMap<String, String> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Build the action-choice set for the given combatant.
///
/// The caller is responsible for seeding the spell-slot cache first
/// ([`CombatContext::ensure_slot_cache`]); an uncached caster sees no
/// spell choices.
pub fn build_choices(ctx: &CombatContext, combatant_id: &str) -> Vec<ActionChoice> {
    let Some(actor) = ctx.combatant(combatant_id) else {
        return Vec::new();
    };
    let enemies = ctx.living(actor.side.opposite());
    if enemies.is_empty() {
        return Vec::new();
    }

    let mut choices = Vec::new();
    for enemy in &enemies {
        choices.push(ActionChoice::new(
            "attack_target",
            args(vec![
                ("target_id", enemy.id.clone()),
                ("target_name", display_name(&enemy.id)),
            ]),
            ActionIntent::MeleeAttack {
                actor_id: combatant_id.to_string(),
                target_id: enemy.id.clone(),
            },
        ));
    }

    let Some(pc) = actor.entity.as_pc() else {
        // Monsters act by melee alone.
        return choices;
    };

    if pc.has_ranged_weapon() {
        for enemy in &enemies {
            choices.push(ActionChoice::new(
                "ranged_attack_target",
                args(vec![
                    ("target_id", enemy.id.clone()),
                    ("target_name", display_name(&enemy.id)),
                ]),
                ActionIntent::RangedAttack {
                    actor_id: combatant_id.to_string(),
                    target_id: enemy.id.clone(),
                },
            ));
        }
    }

    for spell_id in known_spell_forms(pc) {
        let Some(spell) = get_spell(&spell_id) else {
            continue;
        };
        if !spell.classes.contains(&pc.class()) {
            continue;
        }
        if ctx.cached_slots_remaining(combatant_id, spell.spell_level) == 0 {
            continue;
        }
        push_spell_choices(ctx, actor, pc, spell, &enemies, &mut choices);
    }

    for item_name in &pc.loadout().items {
        if super::items::throwable_item(item_name).is_none() {
            continue;
        }
        for enemy in &enemies {
            choices.push(ActionChoice::new(
                "use_item",
                args(vec![
                    ("item_name", item_name.clone()),
                    ("target_id", enemy.id.clone()),
                    ("target_name", display_name(&enemy.id)),
                ]),
                ActionIntent::UseItem {
                    actor_id: combatant_id.to_string(),
                    item_name: item_name.clone(),
                    target_ids: vec![enemy.id.clone()],
                },
            ));
        }
    }

    if pc.class() == CharacterClassType::Cleric && enemies.iter().any(|e| e.entity.is_undead()) {
        choices.push(ActionChoice::new(
            "turn_undead",
            args(Vec::new()),
            ActionIntent::TurnUndead {
                actor_id: combatant_id.to_string(),
            },
        ));
    }

    choices.push(ActionChoice::new(
        "flee",
        args(Vec::new()),
        ActionIntent::Flee {
            actor_id: combatant_id.to_string(),
        },
    ));
    choices
}

/// Known spell ids plus the reverse form of any reversible spell.
fn known_spell_forms(pc: &PlayerCharacter) -> Vec<String> {
    let mut forms = Vec::new();
    for spell_id in &pc.loadout().spells {
        forms.push(spell_id.clone());
        if let Some(spell) = get_spell(spell_id) {
            if let Some(reverse_id) = spell.reverse_id {
                if !spell.is_reversed {
                    forms.push(reverse_id.to_string());
                }
            }
        }
    }
    forms
}

fn push_spell_choices(
    ctx: &CombatContext,
    actor: &CombatantRef,
    _pc: &PlayerCharacter,
    spell: &SpellDefinition,
    enemies: &[&CombatantRef],
    choices: &mut Vec<ActionChoice>,
) {
    let actor_id = actor.id.clone();
    let spell_args = |extra: Vec<(&str, String)>| {
        let mut pairs = vec![
            ("spell_id", spell.id.to_string()),
            ("spell_name", spell.name.to_string()),
        ];
        pairs.extend(extra);
        args(pairs)
    };

    match spell.target_mode {
        TargetMode::SingleEnemy => {
            for enemy in enemies {
                choices.push(ActionChoice::new(
                    "cast_spell",
                    spell_args(vec![
                        ("target_id", enemy.id.clone()),
                        ("target_name", display_name(&enemy.id)),
                    ]),
                    ActionIntent::CastSpell {
                        actor_id: actor_id.clone(),
                        spell_id: spell.id.to_string(),
                        slot_level: spell.spell_level,
                        target_ids: vec![enemy.id.clone()],
                    },
                ));
            }
            // A spell with a group option offers it alongside the
            // single-target forms.
            if let Some(group_dice) = spell.group_target_dice {
                if enemies.len() > 1 {
                    choices.push(ActionChoice::new(
                        "cast_spell",
                        spell_args(vec![
                            ("target_name", "enemy group".to_string()),
                            ("group_dice", group_dice.to_string()),
                        ]),
                        ActionIntent::CastSpell {
                            actor_id: actor_id.clone(),
                            spell_id: spell.id.to_string(),
                            slot_level: spell.spell_level,
                            target_ids: enemies.iter().map(|e| e.id.clone()).collect(),
                        },
                    ));
                }
            }
        }
        TargetMode::AllEnemies => {
            let mut extra = vec![("target_name", "enemy group".to_string())];
            if let Some(group_dice) = spell.group_target_dice {
                extra.push(("group_dice", group_dice.to_string()));
            }
            choices.push(ActionChoice::new(
                "cast_spell",
                spell_args(extra),
                ActionIntent::CastSpell {
                    actor_id: actor_id.clone(),
                    spell_id: spell.id.to_string(),
                    slot_level: spell.spell_level,
                    target_ids: enemies.iter().map(|e| e.id.clone()).collect(),
                },
            ));
        }
        TargetMode::HdPool => {
            let eligible: Vec<String> = enemies
                .iter()
                .filter(|e| {
                    spell
                        .max_target_hd
                        .is_none_or(|cap| combatant_hd(&e.entity) <= cap)
                })
                .filter(|e| !(spell.undead_immune && e.entity.is_undead()))
                .map(|e| e.id.clone())
                .collect();
            if eligible.is_empty() {
                return;
            }
            choices.push(ActionChoice::new(
                "cast_spell",
                spell_args(vec![("target_name", "enemy group".to_string())]),
                ActionIntent::CastSpell {
                    actor_id: actor_id.clone(),
                    spell_id: spell.id.to_string(),
                    slot_level: spell.spell_level,
                    target_ids: eligible,
                },
            ));
        }
        TargetMode::SelfTarget => {
            choices.push(ActionChoice::new(
                "cast_spell",
                spell_args(Vec::new()),
                ActionIntent::CastSpell {
                    actor_id: actor_id.clone(),
                    spell_id: spell.id.to_string(),
                    slot_level: spell.spell_level,
                    target_ids: vec![actor_id.clone()],
                },
            ));
        }
        TargetMode::SingleAlly => {
            for ally in ctx.living(actor.side) {
                choices.push(ActionChoice::new(
                    "cast_spell",
                    spell_args(vec![
                        ("target_id", ally.id.clone()),
                        ("target_name", display_name(&ally.id)),
                    ]),
                    ActionIntent::CastSpell {
                        actor_id: actor_id.clone(),
                        spell_id: spell.id.to_string(),
                        slot_level: spell.spell_level,
                        target_ids: vec![ally.id.clone()],
                    },
                ));
            }
        }
        TargetMode::AllAllies => {
            choices.push(ActionChoice::new(
                "cast_spell",
                spell_args(Vec::new()),
                ActionIntent::CastSpell {
                    actor_id: actor_id.clone(),
                    spell_id: spell.id.to_string(),
                    slot_level: spell.spell_level,
                    target_ids: ctx.living(actor.side).iter().map(|a| a.id.clone()).collect(),
                },
            ));
        }
    }
}
