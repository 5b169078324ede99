//! Encounter lifecycle states and terminal outcomes.

/// The state machine driven by [`super::CombatEngine::step`].
///
/// Only `AwaitIntent` and `Ended` are externally observable suspension
/// points; every other state is transient between two `step()` calls.
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
pub enum EncounterState {
    Init,
    RoundStart,
    TurnStart,
    AwaitIntent,
    ValidateIntent,
    ExecuteAction,
    ApplyEffects,
    CheckDeaths,
    CheckMorale,
    CheckVictory,
    Ended,
}

/// How an encounter ended.
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
pub enum EncounterOutcome {
    PartyVictory,
    OppositionVictory,
    Faulted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_stable_identifiers() {
        assert_eq!(EncounterState::AwaitIntent.as_ref(), "AWAIT_INTENT");
        assert_eq!(EncounterOutcome::PartyVictory.to_string(), "PARTY_VICTORY");
    }

    #[test]
    fn outcomes_serialize_as_screaming_names() {
        let json = serde_json::to_value(EncounterOutcome::OppositionVictory).unwrap();
        assert_eq!(json, serde_json::json!("OPPOSITION_VICTORY"));
    }
}
