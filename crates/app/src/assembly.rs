//! The normalized deployment model shared by both output variants.
//!
//! An [`Assembly`] is what remains after all defaults are resolved and all
//! events are mapped: plain data, no `Option` left where a literal default
//! exists. The two adapters only reshape it; they never re-derive values.

use cumulus_domain::EnvMap;
use cumulus_domain::event::HttpMethod;
use serde_json::Value;

/// Resolved output of one assembly pass over an Abstract Spec.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly {
    pub service: ResolvedService,
    pub region: Option<String>,
    /// Provider access profile, defaulting to `"default"`.
    pub access: String,
    pub functions: Vec<ResolvedFunction>,
    /// All HTTP routes, in function-then-event declaration order.
    pub routes: Vec<RouteEntry>,
    pub domain: Option<DomainBinding>,
}

/// Service-level settings with the provider config maps carried verbatim;
/// key casing is an output-variant concern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedService {
    pub name: String,
    pub description: Option<String>,
    pub role: Option<String>,
    pub internet_access: Option<bool>,
    pub vpc_config: Option<Value>,
    pub policies: Option<Value>,
    pub log_config: Option<Value>,
    pub nas_config: Option<Value>,
    pub async_configuration: Option<Value>,
    pub tracing_config: Option<Value>,
}

/// One function with every default resolved and its triggers mapped.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFunction {
    /// Key under the descriptor's `functions` map; default trigger names
    /// derive from it.
    pub key: String,
    /// Declared `name`, falling back to the map key; keys the output.
    pub output_name: String,
    pub description: String,
    pub handler: String,
    pub initializer: String,
    pub runtime: String,
    pub timeout: u32,
    pub init_timeout: u32,
    pub memory_size: u32,
    pub concurrency: u32,
    pub code_uri: String,
    pub environment: EnvMap,
    pub triggers: Vec<Trigger>,
}

impl ResolvedFunction {
    /// Whether this function contributed at least one HTTP route.
    #[must_use]
    pub fn has_http_trigger(&self) -> bool {
        self.triggers
            .iter()
            .any(|trigger| matches!(trigger.kind, TriggerKind::Http(_)))
    }
}

/// One mapped trigger; the name stays unresolved because its default
/// differs between output variants.
#[derive(Debug, Clone, PartialEq)]
pub struct Trigger {
    pub name: Option<String>,
    pub kind: TriggerKind,
}

/// Default-name style of an output variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerNameStyle {
    /// `"timer"`, `"log"`, `"oss"` — the declarative resource template.
    Bare,
    /// `"timer-<function>"`, … — the component project variant.
    FunctionSuffixed,
}

impl Trigger {
    /// The trigger's output name: the declared name, or the deterministic
    /// default derived from kind and function key. HTTP triggers always
    /// suffix the function key; message-queue triggers never do.
    #[must_use]
    pub fn resolved_name(&self, function_key: &str, style: TriggerNameStyle) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        let base = self.kind.label();
        match (&self.kind, style) {
            (TriggerKind::Http(_), _) => format!("{base}-{function_key}"),
            (TriggerKind::MessageQueue(_), _) | (_, TriggerNameStyle::Bare) => base.to_string(),
            (_, TriggerNameStyle::FunctionSuffixed) => format!("{base}-{function_key}"),
        }
    }
}

/// Kind-specific trigger payload after default resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum TriggerKind {
    Http(HttpTrigger),
    Timer(TimerTrigger),
    Log(LogTrigger),
    ObjectStorage(ObjectStorageTrigger),
    MessageQueue(MessageQueueTrigger),
}

impl TriggerKind {
    /// Short kind label used for default names and component `type` tags.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Timer(_) => "timer",
            Self::Log(_) => "log",
            Self::ObjectStorage(_) => "oss",
            Self::MessageQueue(_) => "mq",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpTrigger {
    pub auth_type: String,
    pub methods: Vec<HttpMethod>,
    pub role: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimerTrigger {
    pub cron_expression: Option<String>,
    pub enable: bool,
    pub payload: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogTrigger {
    pub source: Option<String>,
    pub max_retry_time: u32,
    pub trigger_interval: u32,
    pub project: Option<String>,
    pub logstore: Option<String>,
    pub role: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectStorageTrigger {
    pub bucket: Option<String>,
    pub events: Vec<String>,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub role: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageQueueTrigger {
    pub topic: Option<String>,
    pub notify_strategy: String,
    pub region: Option<String>,
    pub filter_tag: Option<String>,
    pub role: Option<String>,
    pub version: Option<String>,
}

/// One HTTP route, accumulated across all functions of an assembly pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub path: String,
    pub service_name: String,
    pub function_name: String,
    pub methods: Vec<HttpMethod>,
}

/// The custom-domain decision for this assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainBinding {
    pub name: DomainName,
    /// True when the descriptor carried no `customDomain` key at all and
    /// the automatic domain was kept for backward compatibility; this is
    /// the branch that emits the migration notice.
    pub fallback: bool,
}

/// Domain name of the binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainName {
    Auto,
    Named(String),
}
