//! Assembly — the single mapping pass over an Abstract Spec.
//!
//! One invocation walks the functions map in declaration order, resolves
//! the default cascade for every function, maps each declared trigger
//! event, accumulates HTTP routes, and decides the custom-domain binding.
//! Malformed input never fails the pass: missing values fall back to
//! defaults and unrecognized event records are skipped.

use cumulus_domain::EnvMap;
use cumulus_domain::custom_domain::CustomDomain;
use cumulus_domain::event::{EventKind, normalize_methods};
use cumulus_domain::function::FunctionSpec;
use cumulus_domain::provider::Provider;
use cumulus_domain::spec::SpecDocument;

use crate::assembly::{
    Assembly, DomainBinding, DomainName, HttpTrigger, LogTrigger, MessageQueueTrigger,
    ObjectStorageTrigger, ResolvedFunction, ResolvedService, RouteEntry, TimerTrigger, Trigger,
    TriggerKind,
};

const DEFAULT_HANDLER: &str = "index.handler";
const DEFAULT_RUNTIME: &str = "nodejs14";
const DEFAULT_AUTH_TYPE: &str = "ANONYMOUS";
const DEFAULT_CODE_URI: &str = ".";
const DEFAULT_ACCESS: &str = "default";
const DEFAULT_ROUTE_PATH: &str = "/*";
const DEFAULT_TIMEOUT: u32 = 3;
const DEFAULT_INIT_TIMEOUT: u32 = 3;
const DEFAULT_MEMORY_SIZE: u32 = 128;
const DEFAULT_CONCURRENCY: u32 = 1;

/// Assemble a normalized deployment model from an Abstract Spec.
///
/// `user_env` is the externally filtered user-defined environment; it wins
/// over both provider and function environments on key collisions.
///
/// The pass is pure apart from the warn-level migration notice emitted
/// when HTTP routes exist but the descriptor never mentions
/// `custom.customDomain`.
#[must_use]
#[tracing::instrument(skip_all, fields(service = %spec.service.name))]
pub fn assemble(spec: &SpecDocument, user_env: &EnvMap) -> Assembly {
    let provider = &spec.provider;
    let service_name = &spec.service.name;

    let mut routes = Vec::new();
    let mut functions = Vec::new();

    for (key, function) in &spec.functions {
        functions.push(resolve_function(
            key,
            function,
            provider,
            service_name,
            user_env,
            &mut routes,
        ));
    }

    let domain = resolve_domain(spec, &routes);

    Assembly {
        service: ResolvedService {
            name: service_name.clone(),
            description: spec.service.description.clone(),
            role: provider.role.clone(),
            internet_access: provider.internet_access,
            vpc_config: provider.vpc_config.clone(),
            policies: provider.policies.clone(),
            log_config: provider.log_config.clone(),
            nas_config: provider.nas_config.clone(),
            async_configuration: provider.async_configuration.clone(),
            tracing_config: provider.tracing_config.clone(),
        },
        region: provider.region.clone(),
        access: provider
            .access
            .clone()
            .unwrap_or_else(|| DEFAULT_ACCESS.to_string()),
        functions,
        routes,
        domain,
    }
}

/// Ordered-fallback resolution: function override → provider default →
/// literal.
fn cascade<T>(function: Option<T>, provider: Option<T>, fallback: T) -> T {
    function.or(provider).unwrap_or(fallback)
}

fn resolve_function(
    key: &str,
    function: &FunctionSpec,
    provider: &Provider,
    service_name: &str,
    user_env: &EnvMap,
    routes: &mut Vec<RouteEntry>,
) -> ResolvedFunction {
    let output_name = function.name.clone().unwrap_or_else(|| key.to_string());
    let handler = function
        .handler
        .clone()
        .unwrap_or_else(|| DEFAULT_HANDLER.to_string());
    let initializer = function
        .initializer
        .clone()
        .unwrap_or_else(|| default_initializer(&handler));

    let mut triggers = Vec::new();
    for event in &function.events {
        for kind in event.kinds() {
            triggers.push(map_event(
                kind,
                function,
                provider,
                service_name,
                &output_name,
                routes,
            ));
        }
    }

    ResolvedFunction {
        key: key.to_string(),
        output_name,
        description: function.description.clone().unwrap_or_default(),
        initializer,
        handler,
        runtime: cascade(
            function.runtime.clone(),
            provider.runtime.clone(),
            DEFAULT_RUNTIME.to_string(),
        ),
        timeout: cascade(function.timeout, provider.timeout, DEFAULT_TIMEOUT),
        init_timeout: cascade(
            function.init_timeout,
            provider.init_timeout,
            DEFAULT_INIT_TIMEOUT,
        ),
        memory_size: cascade(
            function.memory_size,
            provider.memory_size,
            DEFAULT_MEMORY_SIZE,
        ),
        concurrency: cascade(
            function.concurrency,
            provider.concurrency,
            DEFAULT_CONCURRENCY,
        ),
        code_uri: function
            .code_uri
            .clone()
            .unwrap_or_else(|| DEFAULT_CODE_URI.to_string()),
        environment: merge_environment(
            provider.environment.as_ref(),
            function.environment.as_ref(),
            user_env,
        ),
        triggers,
    }
}

/// The initializer derived from a handler: its module path with the last
/// dot-segment replaced by `initializer`.
fn default_initializer(handler: &str) -> String {
    match handler.rsplit_once('.') {
        Some((module, _)) => format!("{module}.initializer"),
        None => ".initializer".to_string(),
    }
}

/// Merge environments, later sources overriding earlier ones per key while
/// keys keep their first-appearance position.
fn merge_environment(
    provider: Option<&EnvMap>,
    function: Option<&EnvMap>,
    user_env: &EnvMap,
) -> EnvMap {
    let mut merged = EnvMap::new();
    for source in [provider, function, Some(user_env)].into_iter().flatten() {
        for (name, value) in source {
            merged.insert(name.clone(), value.clone());
        }
    }
    merged
}

fn map_event(
    kind: EventKind<'_>,
    function: &FunctionSpec,
    provider: &Provider,
    service_name: &str,
    function_name: &str,
    routes: &mut Vec<RouteEntry>,
) -> Trigger {
    match kind {
        EventKind::Http(event) => {
            let methods = normalize_methods(event.method.as_ref());
            routes.push(RouteEntry {
                path: event
                    .path
                    .clone()
                    .unwrap_or_else(|| DEFAULT_ROUTE_PATH.to_string()),
                service_name: service_name.to_string(),
                function_name: function_name.to_string(),
                methods: methods.clone(),
            });
            Trigger {
                name: event.name.clone(),
                kind: TriggerKind::Http(HttpTrigger {
                    auth_type: cascade(
                        function.auth_type.clone(),
                        provider.auth_type.clone(),
                        DEFAULT_AUTH_TYPE.to_string(),
                    ),
                    methods,
                    role: event.role.clone(),
                    version: event.version.clone(),
                }),
            }
        }
        EventKind::Timer(event) => Trigger {
            name: event.name.clone(),
            kind: TriggerKind::Timer(TimerTrigger {
                cron_expression: event.cron_expression(),
                enable: event.is_enabled(),
                payload: event.payload.clone(),
                version: event.version.clone(),
            }),
        },
        EventKind::Log(event) => Trigger {
            name: event.name.clone(),
            kind: TriggerKind::Log(LogTrigger {
                source: event.source.clone(),
                max_retry_time: event.max_retry_time(),
                trigger_interval: event.trigger_interval(),
                project: event.project.clone(),
                logstore: event.log.clone(),
                role: event.role.clone(),
                version: event.version.clone(),
            }),
        },
        EventKind::ObjectStorage(event) => {
            let filter = event.filter.as_ref();
            Trigger {
                name: event.name.clone(),
                kind: TriggerKind::ObjectStorage(ObjectStorageTrigger {
                    bucket: event.bucket.clone(),
                    events: event.event_types(),
                    prefix: filter.and_then(|filter| filter.prefix.clone()),
                    suffix: filter.and_then(|filter| filter.suffix.clone()),
                    role: event.role.clone(),
                    version: event.version.clone(),
                }),
            }
        }
        EventKind::MessageQueue(event) => Trigger {
            name: event.name.clone(),
            kind: TriggerKind::MessageQueue(MessageQueueTrigger {
                topic: event.topic.clone(),
                notify_strategy: event.notify_strategy().to_string(),
                region: event.region.clone(),
                filter_tag: event.tags.clone(),
                role: event.role.clone(),
                version: event.version.clone(),
            }),
        },
    }
}

/// The three-way custom-domain branch. Only reached when at least one HTTP
/// route exists; the absent branch keeps the automatic domain for
/// descriptors written before the opt-in change and says so once.
fn resolve_domain(spec: &SpecDocument, routes: &[RouteEntry]) -> Option<DomainBinding> {
    if routes.is_empty() {
        return None;
    }
    match spec.custom_domain() {
        Some(CustomDomain::Flag(false)) => None,
        Some(CustomDomain::Flag(true)) => Some(DomainBinding {
            name: DomainName::Auto,
            fallback: false,
        }),
        Some(CustomDomain::Config(config)) if config.is_auto() => Some(DomainBinding {
            name: DomainName::Auto,
            fallback: false,
        }),
        Some(CustomDomain::Config(config)) => Some(DomainBinding {
            name: DomainName::Named(config.domain_name.clone()),
            fallback: false,
        }),
        None => {
            tracing::warn!(
                "no `custom.customDomain` configured: automatic domain names are no longer \
                 provided by default (since 2021-05-01); keeping the automatic domain for \
                 backward compatibility. Add `custom.customDomain.domainName: auto` to your \
                 descriptor to keep this behavior explicitly, or set `customDomain: false` \
                 to disable it"
            );
            Some(DomainBinding {
                name: DomainName::Auto,
                fallback: true,
            })
        }
    }
}
