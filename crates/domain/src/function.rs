//! Function block — one deployable function and its trigger events.

use serde::{Deserialize, Serialize};

use crate::EnvMap;
use crate::event::TriggerEvent;

/// A single function entry of the descriptor's `functions` map.
///
/// Every field is an optional override; the app layer resolves the
/// function → provider → literal default cascade.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionSpec {
    /// Output name; falls back to the functions-map key.
    pub name: Option<String>,
    pub description: Option<String>,
    pub handler: Option<String>,
    pub initializer: Option<String>,
    pub runtime: Option<String>,
    pub timeout: Option<u32>,
    pub init_timeout: Option<u32>,
    pub memory_size: Option<u32>,
    pub concurrency: Option<u32>,
    pub code_uri: Option<String>,
    pub auth_type: Option<String>,
    pub environment: Option<EnvMap>,
    pub events: Vec<TriggerEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_empty_function() {
        let spec: FunctionSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(spec, FunctionSpec::default());
        assert!(spec.events.is_empty());
    }

    #[test]
    fn should_deserialize_events_in_declared_order() {
        let spec: FunctionSpec = serde_json::from_value(serde_json::json!({
            "handler": "index.render",
            "events": [
                {"timer": {"value": "@daily"}},
                {"http": {"path": "/render"}},
            ],
        }))
        .unwrap();
        assert_eq!(spec.events.len(), 2);
        assert!(spec.events[0].timer.is_some());
        assert!(spec.events[1].http.is_some());
    }
}
