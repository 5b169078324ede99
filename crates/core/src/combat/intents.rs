//! Action intents: externally supplied commands for one combatant's turn.
//!
//! Intents are unvalidated input. The engine maps each to a validated
//! action during `VALIDATE_INTENT`; a rejected intent never touches the
//! combat context.

/// A command submitted (or auto-chosen) for the current combatant's turn.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "intent")]
pub enum ActionIntent {
    MeleeAttack {
        actor_id: String,
        target_id: String,
    },
    RangedAttack {
        actor_id: String,
        target_id: String,
    },
    CastSpell {
        actor_id: String,
        spell_id: String,
        slot_level: u8,
        target_ids: Vec<String>,
    },
    UseItem {
        actor_id: String,
        item_name: String,
        target_ids: Vec<String>,
    },
    TurnUndead {
        actor_id: String,
    },
    Flee {
        actor_id: String,
    },
}

impl ActionIntent {
    pub fn actor_id(&self) -> &str {
        match self {
            Self::MeleeAttack { actor_id, .. }
            | Self::RangedAttack { actor_id, .. }
            | Self::CastSpell { actor_id, .. }
            | Self::UseItem { actor_id, .. }
            | Self::TurnUndead { actor_id }
            | Self::Flee { actor_id } => actor_id,
        }
    }

    /// Stable variant name, used in choice listings and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MeleeAttack { .. } => "MeleeAttack",
            Self::RangedAttack { .. } => "RangedAttack",
            Self::CastSpell { .. } => "CastSpell",
            Self::UseItem { .. } => "UseItem",
            Self::TurnUndead { .. } => "TurnUndead",
            Self::Flee { .. } => "Flee",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_id_is_uniform_across_variants() {
        let intent = ActionIntent::CastSpell {
            actor_id: "pc:Mazpar".to_string(),
            spell_id: "magic_missile".to_string(),
            slot_level: 1,
            target_ids: vec!["monster:Goblin:0".to_string()],
        };
        assert_eq!(intent.actor_id(), "pc:Mazpar");
        assert_eq!(intent.kind(), "CastSpell");
    }

    #[test]
    fn serializes_with_a_variant_tag() {
        let intent = ActionIntent::Flee {
            actor_id: "monster:Goblin:0".to_string(),
        };
        let value = serde_json::to_value(&intent).unwrap();
        assert_eq!(value["intent"], "Flee");
        assert_eq!(value["actor_id"], "monster:Goblin:0");
    }
}
