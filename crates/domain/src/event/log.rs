//! Log trigger — invocation from a log-store delivery job.

use serde::{Deserialize, Serialize};

/// Log trigger declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogEvent {
    pub name: Option<String>,
    /// Source log store the delivery job reads from.
    pub source: Option<String>,
    pub retry_time: Option<u32>,
    pub interval: Option<u32>,
    pub project: Option<String>,
    /// Log store the job writes its own logs to.
    pub log: Option<String>,
    pub role: Option<String>,
    pub version: Option<String>,
}

impl LogEvent {
    /// Maximum delivery retries, defaulting to 1.
    #[must_use]
    pub fn max_retry_time(&self) -> u32 {
        self.retry_time.unwrap_or(1)
    }

    /// Trigger interval in seconds, defaulting to 30.
    #[must_use]
    pub fn trigger_interval(&self) -> u32 {
        self.interval.unwrap_or(30)
    }
}
