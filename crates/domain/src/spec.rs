//! The Abstract Spec — the whole descriptor document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::custom_domain::{Custom, CustomDomain};
use crate::function::FunctionSpec;
use crate::provider::Provider;
use crate::service::Service;

/// Fully loaded, provider-agnostic application descriptor.
///
/// The functions map keeps declaration order; everything downstream that
/// is order-sensitive (route tables, event collections) follows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecDocument {
    #[serde(default)]
    pub provider: Provider,
    pub service: Service,
    #[serde(default)]
    pub functions: IndexMap<String, FunctionSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Custom>,
}

impl SpecDocument {
    /// The `custom.customDomain` value, when the whole chain is present.
    #[must_use]
    pub fn custom_domain(&self) -> Option<&CustomDomain> {
        self.custom.as_ref()?.custom_domain.as_ref()
    }
}
