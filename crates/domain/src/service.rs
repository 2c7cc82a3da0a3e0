//! Service block — name and description of the deployed unit.

use serde::{Deserialize, Serialize};

/// Service metadata. The name keys the resource tree in the declarative
/// output variant and becomes the project name in the component variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
