//! Timer trigger — cron or `every`-shorthand schedules.

use serde::{Deserialize, Serialize};

/// Timer trigger declaration.
///
/// `value` carries either a cron expression or, when `kind` is `"every"`,
/// an interval shorthand such as `"5m"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TimerEvent {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<String>,
    pub payload: Option<String>,
    pub enable: Option<bool>,
    pub version: Option<String>,
}

impl TimerEvent {
    /// The schedule expression the provider consumes: the raw value, or
    /// `"@every <value>"` for the interval shorthand.
    #[must_use]
    pub fn cron_expression(&self) -> Option<String> {
        let value = self.value.as_ref()?;
        if self.kind.as_deref() == Some("every") {
            Some(format!("@every {value}"))
        } else {
            Some(value.clone())
        }
    }

    /// Enabled unless explicitly disabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enable != Some(false)
    }
}
