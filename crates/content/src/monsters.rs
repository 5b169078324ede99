//! A small monster manual: stat blocks for common opposition.

use skirmish_core::{Alignment, CharacterClassType, MonsterStatsBlock};

/// The classic dungeon nuisance.
pub fn goblin() -> MonsterStatsBlock {
    MonsterStatsBlock::new("Goblin")
        .description("A small ugly humanoid with a grudge.")
        .armor_class(6)
        .hit_dice("1d8")
        .damage_per_attack("1d6")
        .num_appearing("2d4")
        .save_as(CharacterClassType::Fighter, 1)
        .morale(7)
        .alignment(Alignment::Chaotic)
}

/// A single 1-HP goblin, for encounters that should end quickly.
pub fn weak_goblin() -> MonsterStatsBlock {
    MonsterStatsBlock::new("Goblin")
        .description("A particularly unimpressive goblin.")
        .armor_class(9)
        .hit_dice("1")
        .damage_per_attack("1d4")
        .num_appearing("1")
        .save_as(CharacterClassType::Fighter, 1)
        .morale(7)
        .alignment(Alignment::Chaotic)
}

pub fn skeleton() -> MonsterStatsBlock {
    MonsterStatsBlock::new("Skeleton")
        .description("Animated bones that fight until shattered.")
        .armor_class(7)
        .hit_dice("1d8")
        .damage_per_attack("1d6")
        .num_appearing("3d4")
        .save_as(CharacterClassType::Fighter, 1)
        .morale(12)
        .alignment(Alignment::Chaotic)
        .undead()
}

pub fn zombie() -> MonsterStatsBlock {
    MonsterStatsBlock::new("Zombie")
        .description("A shambling corpse.")
        .armor_class(8)
        .hit_dice("2d8")
        .damage_per_attack("1d8")
        .num_appearing("2d4")
        .save_as(CharacterClassType::Fighter, 1)
        .morale(12)
        .alignment(Alignment::Chaotic)
        .undead()
}

pub fn wight() -> MonsterStatsBlock {
    MonsterStatsBlock::new("Wight")
        .description("A barrow-dweller with a chilling touch.")
        .armor_class(5)
        .hit_dice("3d8")
        .damage_per_attack("1d6")
        .num_appearing("1d6")
        .save_as(CharacterClassType::Fighter, 3)
        .morale(12)
        .alignment(Alignment::Chaotic)
        .undead()
}

pub fn vampire() -> MonsterStatsBlock {
    MonsterStatsBlock::new("Vampire")
        .description("An ancient hunger in a nobleman's shape.")
        .armor_class(2)
        .hit_dice("8d8")
        .damage_per_attack("1d10")
        .num_appearing("1")
        .save_as(CharacterClassType::Fighter, 8)
        .morale(11)
        .alignment(Alignment::Chaotic)
        .undead()
}

pub fn ogre() -> MonsterStatsBlock {
    MonsterStatsBlock::new("Ogre")
        .description("A hulking brute half again as tall as a man.")
        .armor_class(5)
        .hit_dice("4d8+1")
        .damage_per_attack("1d10")
        .num_appearing("1d6")
        .save_as(CharacterClassType::Fighter, 4)
        .morale(10)
        .alignment(Alignment::Chaotic)
}

/// Three heads, three attacks a round.
pub fn hydra() -> MonsterStatsBlock {
    MonsterStatsBlock::new("Hydra")
        .description("A multi-headed beast.")
        .armor_class(5)
        .hit_dice("3d8")
        .attacks_per_round(3)
        .damage_per_attack("1d6")
        .num_appearing("1")
        .save_as(CharacterClassType::Fighter, 3)
        .morale(11)
        .alignment(Alignment::Neutral)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::{FixedDiceService, Monster};

    #[test]
    fn undead_flags_are_set_where_they_should_be() {
        let dice = FixedDiceService::new([4]);
        assert!(Monster::new(&skeleton(), &dice).unwrap().is_undead());
        assert!(Monster::new(&zombie(), &dice).unwrap().is_undead());
        assert!(!Monster::new(&goblin(), &dice).unwrap().is_undead());
    }

    #[test]
    fn weak_goblin_has_exactly_one_hit_point() {
        let dice = FixedDiceService::new([7]);
        let monster = Monster::new(&weak_goblin(), &dice).unwrap();
        assert_eq!(monster.hit_points(), 1);
    }

    #[test]
    fn hydra_attacks_three_times() {
        let dice = FixedDiceService::new([12]);
        let monster = Monster::new(&hydra(), &dice).unwrap();
        assert_eq!(monster.attacks_per_round(), 3);
    }
}
