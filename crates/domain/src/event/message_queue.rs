//! Message-queue trigger — topic subscriptions.

use serde::{Deserialize, Serialize};

/// Message-queue trigger declaration (`mq` in descriptors).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageQueueEvent {
    pub name: Option<String>,
    pub topic: Option<String>,
    pub strategy: Option<String>,
    pub region: Option<String>,
    pub tags: Option<String>,
    pub role: Option<String>,
    pub version: Option<String>,
}

impl MessageQueueEvent {
    /// Retry strategy, defaulting to the provider's backoff policy.
    #[must_use]
    pub fn notify_strategy(&self) -> &str {
        self.strategy.as_deref().unwrap_or("BACKOFF_RETRY")
    }
}
