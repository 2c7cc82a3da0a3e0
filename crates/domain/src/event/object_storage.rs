//! Object-storage trigger — bucket events with key filtering.

use serde::{Deserialize, Serialize};

use crate::one_or_many::OneOrMany;

/// Object-storage trigger declaration (`os`/`oss`/`cos` in descriptors).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectStorageEvent {
    pub name: Option<String>,
    pub bucket: Option<String>,
    /// Bucket event types; a single value is coerced to a sequence.
    pub events: Option<OneOrMany<String>>,
    pub filter: Option<ObjectFilter>,
    pub role: Option<String>,
    pub version: Option<String>,
}

/// Key prefix/suffix filter on bucket events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectFilter {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
}

impl ObjectStorageEvent {
    /// Event types as a sequence, empty when none were declared.
    #[must_use]
    pub fn event_types(&self) -> Vec<String> {
        self.events.as_ref().map(OneOrMany::to_vec).unwrap_or_default()
    }
}
