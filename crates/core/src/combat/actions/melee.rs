//! Melee attack resolution.

use crate::dice::DiceService;
use crate::entity::Entity;

use super::super::context::CombatContext;
use super::super::effects::Effect;
use super::super::engine::EngineError;
use super::super::events::{CombatEvent, Rejection};
use super::super::modifiers::ModifiedStat;
use super::{ActionOutcome, check_actor, check_enemy_target};

/// Resolve a melee attack while deferring mutations as effects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MeleeAttackAction {
    pub actor_id: String,
    pub target_id: String,
}

impl MeleeAttackAction {
    pub fn validate(&self, ctx: &CombatContext) -> Vec<Rejection> {
        if let Some(rejection) = check_actor(ctx, &self.actor_id) {
            return vec![rejection];
        }
        let actor_side = ctx.combatant(&self.actor_id).map(|a| a.side);
        if let Some(side) = actor_side {
            if let Some(rejection) = check_enemy_target(ctx, side, &self.target_id) {
                return vec![rejection];
            }
        }
        Vec::new()
    }

    pub fn execute(
        &self,
        ctx: &CombatContext,
        dice: &dyn DiceService,
    ) -> Result<ActionOutcome, EngineError> {
        let attacker = ctx
            .combatant(&self.actor_id)
            .ok_or_else(|| EngineError::UnknownCombatant {
                id: self.actor_id.clone(),
            })?;
        let defender = ctx
            .combatant(&self.target_id)
            .ok_or_else(|| EngineError::UnknownCombatant {
                id: self.target_id.clone(),
            })?;

        let attack_bonus = ctx.modifiers.get_total(&self.actor_id, ModifiedStat::Attack);
        let damage_bonus = ctx.modifiers.get_total(&self.actor_id, ModifiedStat::Damage);
        let effective_ac = defender.armor_class()
            + ctx.modifiers.get_total(&self.target_id, ModifiedStat::ArmorClass);

        let mut outcome = ActionOutcome::default();
        match &attacker.entity {
            Entity::Pc(pc) => {
                let needed = pc.to_hit_target_ac(effective_ac);
                let roll = pc.attack_roll(dice)?;
                let raw = roll.total;
                let total = roll.total_with_modifier + attack_bonus;
                let critical = raw == 20;
                let hit = critical || (raw > 1 && total >= needed);
                tracing::debug!(
                    attacker = %self.actor_id,
                    defender = %self.target_id,
                    raw, total, needed, hit, critical,
                    "melee attack"
                );
                outcome.events.push(CombatEvent::AttackRolled {
                    attacker_id: self.actor_id.clone(),
                    defender_id: self.target_id.clone(),
                    roll: raw,
                    total,
                    needed,
                    hit,
                    critical,
                });
                if hit {
                    let damage = pc.damage_roll(dice)?;
                    let mut amount = damage.total_with_modifier + damage_bonus;
                    if critical {
                        // 1.5x damage, rounded up.
                        amount = (amount * 3 + 1) / 2;
                    }
                    outcome.effects.push(Effect::Damage {
                        source_id: self.actor_id.clone(),
                        target_id: self.target_id.clone(),
                        amount: amount.max(0),
                    });
                }
            }
            Entity::Monster(monster) => {
                let needed = monster.to_hit_target_ac(effective_ac);
                // Each attack resolves independently, but once the running
                // simulated HP reaches 0 further rolls auto-miss.
                let mut simulated_hp = defender.entity.hit_points();
                for roll in monster.attack_rolls(dice)? {
                    let total = roll.total_with_modifier + attack_bonus;
                    let hit = simulated_hp > 0 && total >= needed;
                    outcome.events.push(CombatEvent::AttackRolled {
                        attacker_id: self.actor_id.clone(),
                        defender_id: self.target_id.clone(),
                        roll: roll.total,
                        total,
                        needed,
                        hit,
                        critical: false,
                    });
                    if hit {
                        let amount =
                            (monster.damage_roll(dice)?.total_with_modifier + damage_bonus).max(0);
                        outcome.effects.push(Effect::Damage {
                            source_id: self.actor_id.clone(),
                            target_id: self.target_id.clone(),
                            amount,
                        });
                        simulated_hp = (simulated_hp - amount).max(0);
                    }
                }
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::super::super::modifiers::ActiveModifier;
    use super::super::super::testkit::*;
    use super::*;
    use crate::combat::events::RejectionCode;
    use crate::dice::FixedDiceService;

    fn attack(actor: &str, target: &str) -> MeleeAttackAction {
        MeleeAttackAction {
            actor_id: actor.to_string(),
            target_id: target.to_string(),
        }
    }

    #[test]
    fn validates_actor_and_target() {
        let mut ctx = ctx_of(
            party_of(vec![fighter("Alice")]),
            spawn_monsters(&goblin_stats(), 4),
        );
        let action = attack("pc:Alice", "monster:Goblin:0");

        // Not the current combatant yet.
        let reasons = action.validate(&ctx);
        assert_eq!(reasons[0].code, RejectionCode::NotCurrentCombatant);

        ctx.current_combatant_id = Some("pc:Alice".to_string());
        assert!(action.validate(&ctx).is_empty());

        let bogus = attack("pc:Ghost", "monster:Goblin:0");
        assert_eq!(bogus.validate(&ctx)[0].code, RejectionCode::InvalidActor);

        let friendly = attack("pc:Alice", "pc:Alice");
        assert_eq!(
            friendly.validate(&ctx)[0].code,
            RejectionCode::TargetNotOpponent
        );

        ctx.combatant_mut("monster:Goblin:0")
            .unwrap()
            .entity
            .apply_damage(100);
        let dead_target = action.validate(&ctx);
        assert_eq!(dead_target[0].code, RejectionCode::InvalidTarget);
        assert!(dead_target[0].message.contains("dead"));
    }

    #[test]
    fn natural_twenty_always_hits_for_half_again_damage() {
        let mut ctx = ctx_of(
            party_of(vec![fighter("Alice")]),
            spawn_monsters(&weak_goblin_stats(), 1),
        );
        ctx.current_combatant_id = Some("pc:Alice".to_string());

        // Attack roll 20, damage roll 5.
        let dice = FixedDiceService::new([20, 5]);
        let outcome = attack("pc:Alice", "monster:Goblin:0")
            .execute(&ctx, &dice)
            .unwrap();

        assert_eq!(outcome.events.len(), 1);
        let CombatEvent::AttackRolled { hit, critical, .. } = outcome.events[0] else {
            panic!("expected AttackRolled");
        };
        assert!(hit);
        assert!(critical);
        assert_eq!(
            outcome.effects,
            vec![Effect::Damage {
                source_id: "pc:Alice".to_string(),
                target_id: "monster:Goblin:0".to_string(),
                amount: 8, // ceil(5 * 1.5)
            }]
        );
    }

    #[test]
    fn natural_one_always_misses() {
        let mut ctx = ctx_of(
            party_of(vec![fighter("Alice")]),
            spawn_monsters(&weak_goblin_stats(), 1),
        );
        ctx.current_combatant_id = Some("pc:Alice".to_string());

        let dice = FixedDiceService::new([1]);
        let outcome = attack("pc:Alice", "monster:Goblin:0")
            .execute(&ctx, &dice)
            .unwrap();
        let CombatEvent::AttackRolled { hit, .. } = outcome.events[0] else {
            panic!("expected AttackRolled");
        };
        assert!(!hit);
        assert!(outcome.effects.is_empty());
    }

    #[test]
    fn monster_multi_attack_stops_on_lethal_damage() {
        let hydra = crate::entity::MonsterStatsBlock::new("Hydra")
            .armor_class(5)
            .hit_dice("3d8")
            .attacks_per_round(3)
            .damage_per_attack("1d6")
            .num_appearing("1");
        let mut ctx = ctx_of(party_of(vec![fighter("Alice")]), spawn_monsters(&hydra, 15));
        ctx.current_combatant_id = Some("monster:Hydra:0".to_string());
        ctx.combatant_mut("pc:Alice")
            .unwrap()
            .entity
            .as_pc_mut()
            .unwrap()
            .set_hit_points(10);

        // Three attack rolls of 15 (needed 8 against AC 9), then damage
        // rolls of 6 for each hit that lands.
        let dice = FixedDiceService::new([15, 15, 15, 6, 6]);
        let outcome = attack("monster:Hydra:0", "pc:Alice")
            .execute(&ctx, &dice)
            .unwrap();

        let hits: Vec<bool> = outcome
            .events
            .iter()
            .map(|e| match e {
                CombatEvent::AttackRolled { hit, .. } => *hit,
                _ => panic!("expected AttackRolled"),
            })
            .collect();
        assert_eq!(hits, vec![true, true, false]);
        let amounts: Vec<i32> = outcome
            .effects
            .iter()
            .map(|e| match e {
                Effect::Damage { amount, .. } => *amount,
                _ => panic!("expected Damage"),
            })
            .collect();
        assert_eq!(amounts, vec![6, 6]);
    }

    #[test]
    fn attack_modifier_raises_the_total() {
        let mut ctx = ctx_of(
            party_of(vec![fighter("Alice")]),
            spawn_monsters(&goblin_stats(), 4),
        );
        ctx.current_combatant_id = Some("pc:Alice".to_string());

        let action = attack("pc:Alice", "monster:Goblin:0");
        let dice = FixedDiceService::new([10, 5]);
        let outcome = action.execute(&ctx, &dice).unwrap();
        let CombatEvent::AttackRolled { total: plain, .. } = outcome.events[0] else {
            panic!("expected AttackRolled");
        };

        ctx.modifiers.add(
            "pc:Alice",
            ActiveModifier::new("bless_atk", "pc:Cleric", ModifiedStat::Attack, 1, Some(6)),
        );
        let dice = FixedDiceService::new([10, 5]);
        let outcome = action.execute(&ctx, &dice).unwrap();
        let CombatEvent::AttackRolled { total: blessed, .. } = outcome.events[0] else {
            panic!("expected AttackRolled");
        };
        assert_eq!(blessed, plain + 1);
    }
}
