//! The adventuring party: an ordered roster of player characters.

use super::player::PlayerCharacter;

/// An ordered list of player characters. Registration order is meaningful:
/// it is the insertion order used for id assignment and initiative
/// tie-breaking.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Party {
    pub name: String,
    pub members: Vec<PlayerCharacter>,
}

impl Party {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            members: Vec::new(),
        }
    }

    pub fn add(&mut self, member: PlayerCharacter) {
        self.members.push(member);
    }

    pub fn is_alive(&self) -> bool {
        self.members.iter().any(PlayerCharacter::is_alive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::FixedDiceService;
    use crate::entity::{AbilityScores, CharacterClassType};

    #[test]
    fn party_tracks_living_members() {
        let dice = FixedDiceService::new([6]);
        let mut party = Party::new("Test Party");
        let mut pc = PlayerCharacter::new(
            "Borin",
            CharacterClassType::Fighter,
            1,
            AbilityScores::default(),
            &dice,
        )
        .unwrap();
        pc.apply_damage(100);
        party.add(pc);
        assert!(!party.is_alive());
    }
}
