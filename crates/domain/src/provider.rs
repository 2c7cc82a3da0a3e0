//! Provider block — platform-level configuration and function defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EnvMap;

/// Provider-wide settings and the default values functions fall back to
/// when they carry no override of their own.
///
/// The free-form config maps (`vpc_config`, `log_config`, …) are kept as
/// raw JSON: their keys are re-cased per output variant, never interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Provider {
    pub name: Option<String>,
    pub role: Option<String>,
    pub internet_access: Option<bool>,
    pub vpc_config: Option<Value>,
    pub policies: Option<Value>,
    pub log_config: Option<Value>,
    pub nas_config: Option<Value>,
    pub async_configuration: Option<Value>,
    pub tracing_config: Option<Value>,
    pub region: Option<String>,
    pub access: Option<String>,
    pub runtime: Option<String>,
    pub timeout: Option<u32>,
    pub init_timeout: Option<u32>,
    pub memory_size: Option<u32>,
    pub concurrency: Option<u32>,
    pub environment: Option<EnvMap>,
    pub auth_type: Option<String>,
}
