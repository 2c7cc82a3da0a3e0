//! Custom-domain configuration — the `custom.customDomain` descriptor key.
//!
//! Three states matter downstream and all are modeled explicitly: an
//! object carrying a domain name, a boolean switch (descriptors written
//! before the opt-in change use `false` to disable the automatic domain),
//! and complete absence of the key.

use serde::{Deserialize, Serialize};

/// Free-form `custom` block; only `customDomain` is interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Custom {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<CustomDomain>,
}

/// The `customDomain` value: either a boolean switch or a configuration
/// object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomDomain {
    Flag(bool),
    Config(DomainConfig),
}

/// Explicit domain configuration. `"auto"` requests a provider-assigned
/// domain name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainConfig {
    pub domain_name: String,
}

impl DomainConfig {
    /// Whether this configuration requests the provider-assigned domain.
    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.domain_name == "auto"
    }
}
