//! Event serialization at the logging/telemetry boundary.
//!
//! Events cross the boundary as `{"kind": <tag>, ...fields}` values with
//! enum fields rendered as string names and tuples as arrays. This is the
//! only wire shape the engine commits to.

use serde_json::Value;

use super::events::CombatEvent;

/// Serializes events to and from their dictionary form.
pub struct EventSerializer;

impl EventSerializer {
    pub fn to_value(event: &CombatEvent) -> Result<Value, serde_json::Error> {
        serde_json::to_value(event)
    }

    pub fn from_value(value: Value) -> Result<CombatEvent, serde_json::Error> {
        serde_json::from_value(value)
    }
}
