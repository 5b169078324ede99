//! Shared fixtures for combat unit tests.

use crate::dice::FixedDiceService;
use crate::entity::{
    AbilityScores, Alignment, CharacterClassType, Monster, MonsterParty, MonsterStatsBlock, Party,
    PlayerCharacter,
};

use super::context::CombatContext;

/// A character with flat ability scores and max-ish fixture hit points.
pub(crate) fn pc_of(name: &str, class: CharacterClassType, level: u8) -> PlayerCharacter {
    let dice = FixedDiceService::new([6]);
    PlayerCharacter::new(name, class, level, AbilityScores::default(), &dice).unwrap()
}

pub(crate) fn fighter(name: &str) -> PlayerCharacter {
    pc_of(name, CharacterClassType::Fighter, 1)
}

pub(crate) fn party_of(members: Vec<PlayerCharacter>) -> Party {
    let mut party = Party::new("Test Party");
    for member in members {
        party.add(member);
    }
    party
}

pub(crate) fn goblin_stats() -> MonsterStatsBlock {
    MonsterStatsBlock::new("Goblin")
        .description("A small ugly humanoid.")
        .armor_class(6)
        .hit_dice("1d8")
        .damage_per_attack("1d6")
        .num_appearing("3")
        .morale(7)
        .alignment(Alignment::Chaotic)
}

pub(crate) fn weak_goblin_stats() -> MonsterStatsBlock {
    MonsterStatsBlock::new("Goblin")
        .description("A weak goblin.")
        .armor_class(9)
        .hit_dice("1")
        .damage_per_attack("1d4")
        .num_appearing("1")
        .morale(7)
        .alignment(Alignment::Chaotic)
}

/// Spawn a monster party with every hit-die roll pinned to `hp_roll`.
pub(crate) fn spawn_monsters(stats: &MonsterStatsBlock, hp_roll: i32) -> MonsterParty {
    let dice = FixedDiceService::new([hp_roll]);
    MonsterParty::spawn(stats, &dice).unwrap()
}

/// A monster party assembled from heterogeneous stat blocks.
pub(crate) fn mixed_monsters(blocks: &[(&MonsterStatsBlock, i32)]) -> MonsterParty {
    let members = blocks
        .iter()
        .map(|(stats, hp_roll)| {
            let dice = FixedDiceService::new([*hp_roll]);
            Monster::new(stats, &dice).unwrap()
        })
        .collect();
    MonsterParty::from_members(members)
}

pub(crate) fn ctx_of(party: Party, monsters: MonsterParty) -> CombatContext {
    CombatContext::build(party, monsters)
}
