//! Spell casting: catalog-driven resolution for damage, conditions,
//! healing, projectiles, and buffs.

use crate::dice::DiceService;
use crate::entity::AttackType;

use super::super::context::{CombatContext, CombatantRef};
use super::super::effects::Effect;
use super::super::engine::EngineError;
use super::super::events::{CombatEvent, Rejection, RejectionCode};
use super::super::modifiers::ModifiedStat;
use super::super::spells::{SpellDefinition, TargetMode, get_spell};
use super::super::targeting::{combatant_hd, resolve_hd_pool, resolve_random_group};
use super::{ActionOutcome, check_actor, check_enemy_target};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastSpellAction {
    pub actor_id: String,
    pub spell_id: String,
    /// Slot level the caster is spending; must match the spell's level.
    pub slot_level: u8,
    pub target_ids: Vec<String>,
}

impl CastSpellAction {
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
                "monsters cannot cast spells",
            )];
        };
        let Some(spell) = get_spell(&self.spell_id) else {
            return vec![Rejection::new(
                RejectionCode::UnknownSpell,
                format!("unknown spell: {}", self.spell_id),
            )];
        };
        if !spell.classes.contains(&pc.class()) {
            return vec![Rejection::new(
                RejectionCode::IneligibleCaster,
                format!("{} cannot cast {}", pc.class(), spell.name),
            )];
        }
        if self.slot_level != spell.spell_level {
            return vec![Rejection::new(
                RejectionCode::SlotLevelMismatch,
                format!("{} is a level {} spell", spell.name, spell.spell_level),
            )];
        }
        match spell.target_mode {
            TargetMode::SingleAlly | TargetMode::AllAllies => {
                for target_id in &self.target_ids {
                    match ctx.combatant(target_id) {
                        None => {
                            return vec![Rejection::new(
                                RejectionCode::InvalidTarget,
                                "target is dead or invalid",
                            )];
                        }
                        Some(target) if !target.is_alive() => {
                            return vec![Rejection::new(
                                RejectionCode::InvalidTarget,
                                "target is dead or invalid",
                            )];
                        }
                        Some(target) if target.side != actor.side => {
                            return vec![Rejection::new(
                                RejectionCode::TargetNotAlly,
                                "target must be an ally",
                            )];
                        }
                        Some(_) => {}
                    }
                }
            }
            TargetMode::SingleEnemy if self.target_ids.len() == 1 => {
                if let Some(rejection) =
                    check_enemy_target(ctx, actor.side, &self.target_ids[0])
                {
                    return vec![rejection];
                }
            }
            // Group, pool, and AoE submissions resolve their own target
            // sets at execution time.
            _ => {}
        }
        Vec::new()
    }

    pub fn execute(
        &self,
        ctx: &CombatContext,
        dice: &dyn DiceService,
    ) -> Result<ActionOutcome, EngineError> {
        let spell = get_spell(&self.spell_id).ok_or_else(|| EngineError::UnknownSpell {
            id: self.spell_id.clone(),
        })?;
        let caster = ctx
            .combatant(&self.actor_id)
            .ok_or_else(|| EngineError::UnknownCombatant {
                id: self.actor_id.clone(),
            })?;
        let caster_level = caster.entity.as_pc().map(|pc| pc.level()).unwrap_or(1);

        let mut outcome = ActionOutcome::default();
        outcome.events.push(CombatEvent::SpellCast {
            caster_id: self.actor_id.clone(),
            spell_id: spell.id.to_string(),
            spell_name: spell.name.to_string(),
            target_ids: self.target_ids.clone(),
        });
        outcome.effects.push(Effect::ConsumeSlot {
            caster_id: self.actor_id.clone(),
            level: spell.spell_level,
        });
        tracing::debug!(caster = %self.actor_id, spell = spell.id, "casting spell");

        if spell.heal_die.is_some() {
            self.resolve_healing(spell, ctx, dice, &mut outcome)?;
        } else if spell.condition_id.is_some() {
            self.resolve_condition(spell, caster, ctx, dice, &mut outcome)?;
        } else if !spell.projectile_thresholds.is_empty() {
            self.resolve_projectiles(spell, caster_level, dice, &mut outcome)?;
        } else if spell.damage_die.is_some() || spell.damage_per_level.is_some() {
            self.resolve_damage(spell, caster, caster_level, ctx, dice, &mut outcome)?;
        }

        if !spell.modifiers.is_empty() {
            for target_id in &self.target_ids {
                let Some(target) = ctx.combatant(target_id) else {
                    continue;
                };
                if !target.is_alive() {
                    continue;
                }
                for modifier in spell.modifiers {
                    outcome.effects.push(Effect::ApplyModifier {
                        source_id: self.actor_id.clone(),
                        target_id: target_id.clone(),
                        modifier_id: modifier.id.to_string(),
                        stat: modifier.stat,
                        value: modifier.value,
                        duration: Some(modifier.duration),
                    });
                }
            }
        }
        Ok(outcome)
    }

    fn resolve_healing(
        &self,
        spell: &SpellDefinition,
        ctx: &CombatContext,
        dice: &dyn DiceService,
        outcome: &mut ActionOutcome,
    ) -> Result<(), EngineError> {
        let heal_die = spell.heal_die.unwrap_or("1d6");
        for target_id in &self.target_ids {
            let Some(target) = ctx.combatant(target_id) else {
                continue;
            };
            if !target.is_alive() {
                continue;
            }
            let amount = dice.roll(heal_die)?.total_with_modifier.max(0);
            outcome.effects.push(Effect::Heal {
                source_id: self.actor_id.clone(),
                target_id: target_id.clone(),
                amount,
            });
        }
        Ok(())
    }

    fn resolve_condition(
        &self,
        spell: &SpellDefinition,
        caster: &CombatantRef,
        ctx: &CombatContext,
        dice: &dyn DiceService,
        outcome: &mut ActionOutcome,
    ) -> Result<(), EngineError> {
        let condition_id = spell.condition_id.unwrap_or_default();

        // HD cap and undead immunity filter before any pool is rolled.
        let candidates: Vec<(String, u32)> = self
            .target_ids
            .iter()
            .filter_map(|id| ctx.combatant(id))
            .filter(|t| t.is_alive() && !t.has_fled && t.side != caster.side)
            .filter(|t| {
                spell
                    .max_target_hd
                    .is_none_or(|cap| combatant_hd(&t.entity) <= cap)
            })
            .filter(|t| !(spell.undead_immune && t.entity.is_undead()))
            .map(|t| (t.id.clone(), combatant_hd(&t.entity)))
            .collect();

        let (resolved, penalty) = if let Some(pool_dice) = spell.hd_pool_dice {
            let pool = dice.roll(pool_dice)?.total_with_modifier;
            let resolved = resolve_hd_pool(&candidates, pool.max(0) as u32);
            outcome.events.push(CombatEvent::GroupTargetsResolved {
                spell_name: spell.name.to_string(),
                pool_roll: Some(pool),
                resolved_target_ids: resolved.clone(),
            });
            (resolved, 0)
        } else if self.target_ids.len() > 1 && spell.group_target_dice.is_some() {
            let pool_dice = spell.group_target_dice.unwrap_or("1d4");
            let pool = dice.roll(pool_dice)?.total_with_modifier;
            let ids: Vec<String> = candidates.iter().map(|(id, _)| id.clone()).collect();
            let resolved = resolve_random_group(&ids, pool.max(0) as usize, dice)?;
            outcome.events.push(CombatEvent::GroupTargetsResolved {
                spell_name: spell.name.to_string(),
                pool_roll: Some(pool),
                resolved_target_ids: resolved.clone(),
            });
            (resolved, 0)
        } else {
            let ids: Vec<String> = candidates.iter().map(|(id, _)| id.clone()).collect();
            (ids, spell.single_save_penalty)
        };

        for target_id in &resolved {
            let Some(target) = ctx.combatant(target_id) else {
                continue;
            };
            if let Some(save_type) = spell.save_type {
                let (event, success) =
                    roll_saving_throw(ctx, target, save_type, penalty, spell.name, dice)?;
                outcome.events.push(event);
                if success && spell.save_negates {
                    continue;
                }
            }
            outcome.effects.push(Effect::ApplyCondition {
                source_id: self.actor_id.clone(),
                target_id: target_id.clone(),
                condition_id: condition_id.to_string(),
                duration: spell.condition_duration,
            });
        }
        Ok(())
    }

    fn resolve_projectiles(
        &self,
        spell: &SpellDefinition,
        caster_level: u8,
        dice: &dyn DiceService,
        outcome: &mut ActionOutcome,
    ) -> Result<(), EngineError> {
        let Some(target_id) = self.target_ids.first() else {
            return Ok(());
        };
        let die = spell.damage_die.unwrap_or("1d4");
        for _ in 0..projectile_count(spell, caster_level) {
            let amount = dice.roll(die)?.total_with_modifier.max(0);
            outcome.effects.push(Effect::Damage {
                source_id: self.actor_id.clone(),
                target_id: target_id.clone(),
                amount,
            });
        }
        Ok(())
    }

    fn resolve_damage(
        &self,
        spell: &SpellDefinition,
        caster: &CombatantRef,
        caster_level: u8,
        ctx: &CombatContext,
        dice: &dyn DiceService,
        outcome: &mut ActionOutcome,
    ) -> Result<(), EngineError> {
        // One damage roll shared by every target of the cast.
        let mut amount = 0;
        if let Some(die) = spell.damage_die {
            amount += dice.roll(die)?.total_with_modifier;
        }
        if let Some(die) = spell.damage_per_level {
            let scaled = if spell.caster_level_cap > 0 {
                caster_level.min(spell.caster_level_cap)
            } else {
                caster_level
            };
            for _ in 0..scaled {
                amount += dice.roll(die)?.total_with_modifier;
            }
        }
        let amount = amount.max(0);

        let penalty = if self.target_ids.len() == 1 {
            spell.single_save_penalty
        } else {
            0
        };
        for target_id in &self.target_ids {
            let Some(target) = ctx.combatant(target_id) else {
                continue;
            };
            if !target.is_alive() || target.side == caster.side {
                continue;
            }
            let mut dealt = amount;
            if let Some(save_type) = spell.save_type {
                let (event, success) =
                    roll_saving_throw(ctx, target, save_type, penalty, spell.name, dice)?;
                outcome.events.push(event);
                if success {
                    if spell.save_negates {
                        continue;
                    }
                    dealt = amount / 2;
                }
            }
            outcome.effects.push(Effect::Damage {
                source_id: self.actor_id.clone(),
                target_id: target_id.clone(),
                amount: dealt,
            });
        }
        Ok(())
    }
}

/// Number of projectiles at a caster level: the largest matching threshold.
fn projectile_count(spell: &SpellDefinition, caster_level: u8) -> u32 {
    spell
        .projectile_thresholds
        .iter()
        .filter(|(min_level, _)| caster_level >= *min_level)
        .map(|(_, count)| *count)
        .max()
        .unwrap_or(1)
}

/// Roll one saving throw, honoring temporary SAVE modifiers and the
/// spell's single-target penalty (negative penalties make saving harder).
pub(crate) fn roll_saving_throw(
    ctx: &CombatContext,
    target: &CombatantRef,
    save_type: AttackType,
    penalty: i32,
    spell_name: &str,
    dice: &dyn DiceService,
) -> Result<(CombatEvent, bool), EngineError> {
    let target_number = target.entity.saving_throw_target(save_type);
    let roll = dice.roll("1d20")?;
    let save_bonus = ctx.modifiers.get_total(&target.id, ModifiedStat::Save);
    let success = roll.total_with_modifier + penalty + save_bonus >= target_number;
    let event = CombatEvent::SavingThrowRolled {
        target_id: target.id.clone(),
        save_type,
        target_number,
        roll: roll.total_with_modifier,
        success,
        spell_name: spell_name.to_string(),
        penalty,
    };
    Ok((event, success))
}

#[cfg(test)]
mod tests {
    use super::super::super::testkit::*;
    use super::*;
    use crate::dice::FixedDiceService;
    use crate::entity::{CharacterClassType, MonsterStatsBlock};

    fn cast(actor: &str, spell_id: &str, slot_level: u8, targets: &[&str]) -> CastSpellAction {
        CastSpellAction {
            actor_id: actor.to_string(),
            spell_id: spell_id.to_string(),
            slot_level,
            target_ids: targets.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn count_damage(outcome: &ActionOutcome) -> usize {
        outcome
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::Damage { .. }))
            .count()
    }

    fn condition_effects(outcome: &ActionOutcome) -> Vec<&Effect> {
        outcome
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::ApplyCondition { .. }))
            .collect()
    }

    fn save_events(outcome: &ActionOutcome) -> Vec<&CombatEvent> {
        outcome
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::SavingThrowRolled { .. }))
            .collect()
    }

    fn group_events(outcome: &ActionOutcome) -> Vec<&CombatEvent> {
        outcome
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::GroupTargetsResolved { .. }))
            .collect()
    }

    #[test]
    fn magic_missile_resolves_to_consume_slot_plus_damage() {
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Mazpar", CharacterClassType::MagicUser, 1)]),
            spawn_monsters(&weak_goblin_stats(), 1),
        );
        ctx.current_combatant_id = Some("pc:Mazpar".to_string());

        let action = cast("pc:Mazpar", "magic_missile", 1, &["monster:Goblin:0"]);
        assert!(action.validate(&ctx).is_empty());

        let dice = FixedDiceService::new([4]);
        let outcome = action.execute(&ctx, &dice).unwrap();

        let CombatEvent::SpellCast {
            spell_id,
            spell_name,
            ..
        } = &outcome.events[0]
        else {
            panic!("expected SpellCast first");
        };
        assert_eq!(spell_id, "magic_missile");
        assert_eq!(spell_name, "Magic Missile");

        assert!(matches!(
            outcome.effects[0],
            Effect::ConsumeSlot { level: 1, .. }
        ));
        assert_eq!(count_damage(&outcome), 1);
        assert!(save_events(&outcome).is_empty(), "auto-hit spell, no save");
    }

    #[test]
    fn magic_missile_projectiles_scale_with_level() {
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Mazpar", CharacterClassType::MagicUser, 6)]),
            spawn_monsters(&weak_goblin_stats(), 1),
        );
        ctx.current_combatant_id = Some("pc:Mazpar".to_string());

        let dice = FixedDiceService::new([4]);
        let outcome = cast("pc:Mazpar", "magic_missile", 1, &["monster:Goblin:0"])
            .execute(&ctx, &dice)
            .unwrap();
        assert_eq!(count_damage(&outcome), 3, "three missiles at level 6");
    }

    #[test]
    fn sleep_resolves_an_hd_pool() {
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Mazpar", CharacterClassType::MagicUser, 1)]),
            spawn_monsters(&goblin_stats(), 4),
        );
        ctx.current_combatant_id = Some("pc:Mazpar".to_string());

        // Pool roll of 1: only one 1-HD goblin fits.
        let dice = FixedDiceService::new([1]);
        let outcome = cast(
            "pc:Mazpar",
            "sleep",
            1,
            &["monster:Goblin:0", "monster:Goblin:1", "monster:Goblin:2"],
        )
        .execute(&ctx, &dice)
        .unwrap();

        let groups = group_events(&outcome);
        assert_eq!(groups.len(), 1);
        let CombatEvent::GroupTargetsResolved {
            pool_roll,
            resolved_target_ids,
            ..
        } = groups[0]
        else {
            unreachable!();
        };
        assert_eq!(*pool_roll, Some(1));
        assert_eq!(resolved_target_ids.len(), 1);
        assert_eq!(condition_effects(&outcome).len(), 1);
        assert!(save_events(&outcome).is_empty(), "sleep allows no save");
    }

    #[test]
    fn sleep_takes_lowest_hit_dice_first() {
        let rat = MonsterStatsBlock::new("Rat").hit_dice("1d8");
        let zombie = MonsterStatsBlock::new("Zombie").hit_dice("2d8");
        let ogre = MonsterStatsBlock::new("Ogre").hit_dice("4d8");
        let monsters = mixed_monsters(&[(&rat, 4), (&zombie, 9), (&ogre, 18)]);
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Mazpar", CharacterClassType::MagicUser, 1)]),
            monsters,
        );
        ctx.current_combatant_id = Some("pc:Mazpar".to_string());

        // Pool of 3 covers the rat (1 HD) and zombie (2 HD) only.
        let dice = FixedDiceService::new([3]);
        let outcome = cast(
            "pc:Mazpar",
            "sleep",
            1,
            &["monster:Rat:0", "monster:Zombie:1", "monster:Ogre:2"],
        )
        .execute(&ctx, &dice)
        .unwrap();

        let CombatEvent::GroupTargetsResolved {
            resolved_target_ids, ..
        } = group_events(&outcome)[0]
        else {
            unreachable!();
        };
        assert_eq!(
            resolved_target_ids,
            &vec!["monster:Rat:0".to_string(), "monster:Zombie:1".to_string()]
        );
        assert_eq!(condition_effects(&outcome).len(), 2);
    }

    #[test]
    fn sleep_excludes_high_hd_and_undead() {
        let ogre = MonsterStatsBlock::new("Ogre").hit_dice("5d8");
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Mazpar", CharacterClassType::MagicUser, 1)]),
            mixed_monsters(&[(&ogre, 22)]),
        );
        ctx.current_combatant_id = Some("pc:Mazpar".to_string());
        let dice = FixedDiceService::new([12]);
        let outcome = cast("pc:Mazpar", "sleep", 1, &["monster:Ogre:0"])
            .execute(&ctx, &dice)
            .unwrap();
        let CombatEvent::GroupTargetsResolved {
            resolved_target_ids, ..
        } = group_events(&outcome)[0]
        else {
            unreachable!();
        };
        assert!(resolved_target_ids.is_empty());
        assert!(condition_effects(&outcome).is_empty());

        let skeleton = MonsterStatsBlock::new("Skeleton").hit_dice("1d8").undead();
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Mazpar", CharacterClassType::MagicUser, 1)]),
            mixed_monsters(&[(&skeleton, 4), (&skeleton, 4)]),
        );
        ctx.current_combatant_id = Some("pc:Mazpar".to_string());
        let dice = FixedDiceService::new([12]);
        let outcome = cast(
            "pc:Mazpar",
            "sleep",
            1,
            &["monster:Skeleton:0", "monster:Skeleton:1"],
        )
        .execute(&ctx, &dice)
        .unwrap();
        let CombatEvent::GroupTargetsResolved {
            resolved_target_ids, ..
        } = group_events(&outcome)[0]
        else {
            unreachable!();
        };
        assert!(resolved_target_ids.is_empty(), "undead do not sleep");
        assert!(condition_effects(&outcome).is_empty());
    }

    #[test]
    fn hold_person_single_target_carries_the_save_penalty() {
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Wilbur", CharacterClassType::Cleric, 4)]),
            spawn_monsters(&goblin_stats(), 4),
        );
        ctx.current_combatant_id = Some("pc:Wilbur".to_string());

        // Save roll of 10: 10 - 2 falls short of the goblin's 16.
        let dice = FixedDiceService::new([10]);
        let outcome = cast("pc:Wilbur", "hold_person", 2, &["monster:Goblin:0"])
            .execute(&ctx, &dice)
            .unwrap();

        let saves = save_events(&outcome);
        assert_eq!(saves.len(), 1);
        let CombatEvent::SavingThrowRolled {
            penalty, success, ..
        } = saves[0]
        else {
            unreachable!();
        };
        assert_eq!(*penalty, -2);
        assert!(!success);
        let conditions = condition_effects(&outcome);
        assert_eq!(conditions.len(), 1);
        assert!(matches!(
            conditions[0],
            Effect::ApplyCondition { condition_id, duration: Some(9), .. }
                if condition_id == "held"
        ));
    }

    #[test]
    fn hold_person_group_mode_rolls_a_pool_at_no_penalty() {
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Wilbur", CharacterClassType::Cleric, 4)]),
            spawn_monsters(&goblin_stats(), 4),
        );
        ctx.current_combatant_id = Some("pc:Wilbur".to_string());

        // 1d4 pool of 1, random pick lands on the first goblin, save 10.
        let dice = FixedDiceService::new([1, 1, 10]);
        let outcome = cast(
            "pc:Wilbur",
            "hold_person",
            2,
            &["monster:Goblin:0", "monster:Goblin:1", "monster:Goblin:2"],
        )
        .execute(&ctx, &dice)
        .unwrap();

        let CombatEvent::GroupTargetsResolved {
            pool_roll,
            resolved_target_ids,
            ..
        } = group_events(&outcome)[0]
        else {
            unreachable!();
        };
        assert_eq!(*pool_roll, Some(1));
        assert_eq!(resolved_target_ids.len(), 1);

        let saves = save_events(&outcome);
        assert_eq!(saves.len(), 1);
        let CombatEvent::SavingThrowRolled { penalty, .. } = saves[0] else {
            unreachable!();
        };
        assert_eq!(*penalty, 0);
    }

    #[test]
    fn hold_person_respects_the_hd_cap() {
        let ogre = MonsterStatsBlock::new("Ogre").hit_dice("5d8");
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Wilbur", CharacterClassType::Cleric, 4)]),
            mixed_monsters(&[(&ogre, 22)]),
        );
        ctx.current_combatant_id = Some("pc:Wilbur".to_string());

        let dice = FixedDiceService::new([10]);
        let outcome = cast("pc:Wilbur", "hold_person", 2, &["monster:Ogre:0"])
            .execute(&ctx, &dice)
            .unwrap();
        assert!(save_events(&outcome).is_empty(), "filtered before any save");
        assert!(condition_effects(&outcome).is_empty());
    }

    #[test]
    fn successful_save_negates_hold_person() {
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Wilbur", CharacterClassType::Cleric, 4)]),
            spawn_monsters(&goblin_stats(), 4),
        );
        ctx.current_combatant_id = Some("pc:Wilbur".to_string());

        // 20 - 2 = 18 clears the goblin's 16.
        let dice = FixedDiceService::new([20]);
        let outcome = cast("pc:Wilbur", "hold_person", 2, &["monster:Goblin:0"])
            .execute(&ctx, &dice)
            .unwrap();
        let CombatEvent::SavingThrowRolled { success, .. } = save_events(&outcome)[0] else {
            unreachable!();
        };
        assert!(success);
        assert!(condition_effects(&outcome).is_empty());
    }

    #[test]
    fn fireball_scales_with_caster_level_and_halves_on_save() {
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Mazpar", CharacterClassType::MagicUser, 5)]),
            spawn_monsters(&goblin_stats(), 4),
        );
        ctx.current_combatant_id = Some("pc:Mazpar".to_string());

        // Five 1d6 rolls of 6, then a save of 20 (goblins save vs dragon
        // breath at 15).
        let dice = FixedDiceService::new([6, 6, 6, 6, 6, 20]);
        let outcome = cast("pc:Mazpar", "fireball", 3, &["monster:Goblin:0"])
            .execute(&ctx, &dice)
            .unwrap();
        assert_eq!(save_events(&outcome).len(), 1);
        assert!(matches!(
            outcome.effects[1],
            Effect::Damage { amount: 15, .. }
        ));

        // Failed save takes the full 30.
        let dice = FixedDiceService::new([6, 6, 6, 6, 6, 1]);
        let outcome = cast("pc:Mazpar", "fireball", 3, &["monster:Goblin:0"])
            .execute(&ctx, &dice)
            .unwrap();
        assert!(matches!(
            outcome.effects[1],
            Effect::Damage { amount: 30, .. }
        ));
    }

    #[test]
    fn cure_light_wounds_heals_an_ally() {
        let mut ctx = ctx_of(
            party_of(vec![
                pc_of("Wilbur", CharacterClassType::Cleric, 2),
                fighter("Alice"),
            ]),
            spawn_monsters(&goblin_stats(), 4),
        );
        ctx.current_combatant_id = Some("pc:Wilbur".to_string());

        let action = cast("pc:Wilbur", "cure_light_wounds", 1, &["pc:Alice"]);
        assert!(action.validate(&ctx).is_empty());

        let dice = FixedDiceService::new([4]);
        let outcome = action.execute(&ctx, &dice).unwrap();
        assert!(matches!(
            outcome.effects[1],
            Effect::Heal { amount: 5, .. } // 4 + 1
        ));
    }

    #[test]
    fn cure_light_wounds_rejects_enemy_targets() {
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Wilbur", CharacterClassType::Cleric, 2)]),
            spawn_monsters(&goblin_stats(), 4),
        );
        ctx.current_combatant_id = Some("pc:Wilbur".to_string());

        let reasons = cast("pc:Wilbur", "cure_light_wounds", 1, &["monster:Goblin:0"])
            .validate(&ctx);
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].code, RejectionCode::TargetNotAlly);
    }

    #[test]
    fn cause_light_wounds_is_the_offensive_reverse() {
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Wilbur", CharacterClassType::Cleric, 2)]),
            spawn_monsters(&goblin_stats(), 4),
        );
        ctx.current_combatant_id = Some("pc:Wilbur".to_string());

        let action = cast("pc:Wilbur", "cause_light_wounds", 1, &["monster:Goblin:0"]);
        assert!(action.validate(&ctx).is_empty());

        // Damage roll of 4 (+1), then a save of 2 against the goblin's 16.
        let dice = FixedDiceService::new([4, 2]);
        let outcome = action.execute(&ctx, &dice).unwrap();
        let saves = save_events(&outcome);
        assert_eq!(saves.len(), 1);
        let CombatEvent::SavingThrowRolled { success, .. } = saves[0] else {
            unreachable!();
        };
        assert!(!success);
        assert_eq!(count_damage(&outcome), 1);
        assert!(matches!(
            outcome.effects[1],
            Effect::Damage { amount: 5, .. }
        ));
    }

    #[test]
    fn a_successful_save_negates_cause_light_wounds() {
        let mut ctx = ctx_of(
            party_of(vec![pc_of("Wilbur", CharacterClassType::Cleric, 2)]),
            spawn_monsters(&goblin_stats(), 4),
        );
        ctx.current_combatant_id = Some("pc:Wilbur".to_string());

        // Save roll of 20 clears the goblin's 16; the wound never lands.
        let dice = FixedDiceService::new([4, 20]);
        let outcome = cast("pc:Wilbur", "cause_light_wounds", 1, &["monster:Goblin:0"])
            .execute(&ctx, &dice)
            .unwrap();
        let CombatEvent::SavingThrowRolled { success, .. } = save_events(&outcome)[0] else {
            unreachable!();
        };
        assert!(success);
        assert_eq!(count_damage(&outcome), 0);
    }

    #[test]
    fn bless_grants_attack_and_save_modifiers_to_the_party() {
        let mut ctx = ctx_of(
            party_of(vec![
                pc_of("Wilbur", CharacterClassType::Cleric, 4),
                fighter("Alice"),
            ]),
            spawn_monsters(&goblin_stats(), 4),
        );
        ctx.current_combatant_id = Some("pc:Wilbur".to_string());

        let dice = FixedDiceService::new([1]);
        let outcome = cast("pc:Wilbur", "bless", 2, &["pc:Wilbur", "pc:Alice"])
            .execute(&ctx, &dice)
            .unwrap();
        let modifier_effects: Vec<&Effect> = outcome
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::ApplyModifier { .. }))
            .collect();
        // Two modifiers per blessed character.
        assert_eq!(modifier_effects.len(), 4);
    }

    #[test]
    fn validation_rejections() {
        let mut ctx = ctx_of(
            party_of(vec![
                fighter("Alice"),
                pc_of("Wilbur", CharacterClassType::Cleric, 4),
            ]),
            spawn_monsters(&goblin_stats(), 4),
        );

        // Fighters cannot cast.
        ctx.current_combatant_id = Some("pc:Alice".to_string());
        let reasons = cast("pc:Alice", "magic_missile", 1, &["monster:Goblin:0"]).validate(&ctx);
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].code, RejectionCode::IneligibleCaster);

        // Wrong slot level.
        ctx.current_combatant_id = Some("pc:Wilbur".to_string());
        let reasons = cast("pc:Wilbur", "hold_person", 1, &["monster:Goblin:0"]).validate(&ctx);
        assert_eq!(reasons.len(), 1);
        assert_eq!(reasons[0].code, RejectionCode::SlotLevelMismatch);

        // Unknown spell.
        let reasons = cast("pc:Wilbur", "wish", 9, &["monster:Goblin:0"]).validate(&ctx);
        assert_eq!(reasons[0].code, RejectionCode::UnknownSpell);

        // Monsters never cast.
        ctx.current_combatant_id = Some("monster:Goblin:0".to_string());
        let reasons = cast("monster:Goblin:0", "magic_missile", 1, &["pc:Alice"]).validate(&ctx);
        assert_eq!(reasons[0].code, RejectionCode::MonsterActionNotSupported);
    }
}
