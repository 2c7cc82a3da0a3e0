//! Trigger events — the invocation sources a function declares.
//!
//! A descriptor event is a record carrying one payload per trigger kind it
//! declares. Kind dispatch is expressed through [`EventKind`], a closed sum
//! over the recognized kinds; records declaring none of them map to nothing.

mod http;
mod log;
mod message_queue;
mod object_storage;
mod timer;

pub use http::{ALL_METHODS, HttpEvent, HttpMethod, normalize_methods};
pub use log::LogEvent;
pub use message_queue::MessageQueueEvent;
pub use object_storage::{ObjectFilter, ObjectStorageEvent};
pub use timer::TimerEvent;

use serde::{Deserialize, Serialize};

/// One entry of a function's `events` list.
///
/// Multiple kinds may be declared on a single record; each present kind is
/// mapped independently. Unknown keys are ignored, so a record made only of
/// unrecognized kinds is silently skipped downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerEvent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<HttpEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<LogEvent>,
    /// Object storage, under whichever alias the provider dialect uses.
    #[serde(alias = "oss", alias = "cos", skip_serializing_if = "Option::is_none")]
    pub os: Option<ObjectStorageEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mq: Option<MessageQueueEvent>,
}

/// A single recognized trigger kind borrowed from a [`TriggerEvent`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind<'a> {
    Http(&'a HttpEvent),
    Timer(&'a TimerEvent),
    Log(&'a LogEvent),
    ObjectStorage(&'a ObjectStorageEvent),
    MessageQueue(&'a MessageQueueEvent),
}

impl TriggerEvent {
    /// The kinds present on this record, in fixed dispatch order
    /// (http, timer, log, object storage, message queue).
    #[must_use]
    pub fn kinds(&self) -> Vec<EventKind<'_>> {
        let mut kinds = Vec::new();
        if let Some(event) = &self.http {
            kinds.push(EventKind::Http(event));
        }
        if let Some(event) = &self.timer {
            kinds.push(EventKind::Timer(event));
        }
        if let Some(event) = &self.log {
            kinds.push(EventKind::Log(event));
        }
        if let Some(event) = &self.os {
            kinds.push(EventKind::ObjectStorage(event));
        }
        if let Some(event) = &self.mq {
            kinds.push(EventKind::MessageQueue(event));
        }
        kinds
    }
}
