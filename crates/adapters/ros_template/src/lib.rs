//! # cumulus-adapter-ros-template
//!
//! Declarative resource-template output variant.
//!
//! Renders an assembled deployment model as a single ROS template object:
//! fixed `ROSTemplateFormatVersion`/`Transform` header, a `Resources` map
//! keyed by service name with the function resources nested inside, and —
//! when HTTP routes exist and the domain is not disabled — one custom-domain
//! resource carrying the aggregated route table. The finished tree runs
//! through the empty-attribute finalizer before it is returned.

use cumulus_app::assembly::{
    DomainBinding, DomainName, ResolvedFunction, ResolvedService, RouteEntry, Trigger,
    TriggerKind, TriggerNameStyle,
};
use cumulus_app::value::{prune_empty_attributes, uppercase_object_key};
use cumulus_domain::EnvMap;
use cumulus_domain::event::HttpMethod;
use cumulus_domain::spec::SpecDocument;
use serde::Serialize;
use serde_json::{Map, Value, json};

const TEMPLATE_FORMAT_VERSION: &str = "2015-09-01";
const TRANSFORM: &str = "Aliyun::Serverless-2018-04-03";
const SERVICE_TYPE: &str = "Aliyun::Serverless::Service";
const FUNCTION_TYPE: &str = "Aliyun::Serverless::Function";
const DOMAIN_TYPE: &str = "Aliyun::Serverless::CustomDomain";
/// Resource name of the automatic domain, kept verbatim for descriptors
/// that rely on it.
const AUTO_DOMAIN_RESOURCE: &str = "midway_auto_domain";

/// Rendering failure. The mapping itself cannot fail; only the conversion
/// of typed template fragments into JSON values can.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to serialize a template fragment")]
    Serialize(#[from] serde_json::Error),
}

/// Build the declarative resource template for a descriptor.
///
/// `user_env` is the externally filtered user-defined environment map.
///
/// # Errors
///
/// Returns [`TemplateError::Serialize`] when a template fragment cannot be
/// converted to JSON.
pub fn build_template(spec: &SpecDocument, user_env: &EnvMap) -> Result<Value, TemplateError> {
    let assembly = cumulus_app::assemble(spec, user_env);

    let mut service_resource = Map::new();
    service_resource.insert("Type".to_string(), json!(SERVICE_TYPE));
    service_resource.insert(
        "Properties".to_string(),
        serde_json::to_value(service_properties(&assembly.service))?,
    );
    for function in &assembly.functions {
        service_resource.insert(function.output_name.clone(), function_resource(function)?);
    }

    let mut resources = Map::new();
    resources.insert(
        assembly.service.name.clone(),
        Value::Object(service_resource),
    );
    if let Some(domain) = &assembly.domain {
        let (name, resource) = domain_resource(domain, &assembly.routes);
        resources.insert(name, resource);
    }

    let mut template = Map::new();
    template.insert(
        "ROSTemplateFormatVersion".to_string(),
        json!(TEMPLATE_FORMAT_VERSION),
    );
    template.insert("Transform".to_string(), json!(TRANSFORM));
    template.insert("Resources".to_string(), Value::Object(resources));

    Ok(prune_empty_attributes(Value::Object(template)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ServiceProperties {
    description: Option<String>,
    role: Option<String>,
    internet_access: Option<bool>,
    vpc_config: Option<Value>,
    policies: Option<Value>,
    log_config: Option<Value>,
    nas_config: Option<Value>,
    async_configuration: Option<Value>,
    tracing_config: Option<Value>,
}

fn service_properties(service: &ResolvedService) -> ServiceProperties {
    ServiceProperties {
        description: service.description.clone(),
        role: service.role.clone(),
        internet_access: service.internet_access,
        vpc_config: service.vpc_config.clone().map(uppercase_object_key),
        policies: service.policies.clone().map(uppercase_object_key),
        log_config: service.log_config.clone().map(uppercase_object_key),
        nas_config: service.nas_config.clone().map(uppercase_object_key),
        async_configuration: service
            .async_configuration
            .clone()
            .map(uppercase_object_key),
        tracing_config: service.tracing_config.clone(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct FunctionProperties<'a> {
    description: &'a str,
    initializer: &'a str,
    handler: &'a str,
    runtime: &'a str,
    code_uri: &'a str,
    timeout: u32,
    initialization_timeout: u32,
    memory_size: u32,
    environment_variables: &'a EnvMap,
    instance_concurrency: u32,
}

fn function_resource(function: &ResolvedFunction) -> Result<Value, TemplateError> {
    let properties = FunctionProperties {
        description: &function.description,
        initializer: &function.initializer,
        handler: &function.handler,
        runtime: &function.runtime,
        code_uri: &function.code_uri,
        timeout: function.timeout,
        initialization_timeout: function.init_timeout,
        memory_size: function.memory_size,
        environment_variables: &function.environment,
        instance_concurrency: function.concurrency,
    };

    let mut events = Map::new();
    for trigger in &function.triggers {
        // Same-name triggers overwrite, keeping the first position.
        events.insert(
            trigger.resolved_name(&function.key, TriggerNameStyle::Bare),
            event_record(trigger)?,
        );
    }

    let mut resource = Map::new();
    resource.insert("Type".to_string(), json!(FUNCTION_TYPE));
    resource.insert("Properties".to_string(), serde_json::to_value(properties)?);
    resource.insert("Events".to_string(), Value::Object(events));
    Ok(Value::Object(resource))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct HttpEventProperties<'a> {
    auth_type: &'a str,
    methods: &'a [HttpMethod],
    invocation_role: Option<&'a str>,
    qualifier: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TimerEventProperties<'a> {
    cron_expression: Option<&'a str>,
    enable: bool,
    payload: Option<&'a str>,
    qualifier: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct LogEventProperties<'a> {
    source_config: LogSourceConfig<'a>,
    job_config: LogJobConfig,
    log_config: LogStoreConfig<'a>,
    enable: bool,
    invocation_role: Option<&'a str>,
    qualifier: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct LogSourceConfig<'a> {
    logstore: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct LogJobConfig {
    max_retry_time: u32,
    trigger_interval: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct LogStoreConfig<'a> {
    project: Option<&'a str>,
    logstore: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ObjectStorageEventProperties<'a> {
    bucket_name: Option<&'a str>,
    events: &'a [String],
    filter: ObjectStorageFilter<'a>,
    enable: bool,
    invocation_role: Option<&'a str>,
    qualifier: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ObjectStorageFilter<'a> {
    key: ObjectStorageKeyFilter<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ObjectStorageKeyFilter<'a> {
    prefix: Option<&'a str>,
    suffix: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct MessageQueueEventProperties<'a> {
    topic_name: Option<&'a str>,
    notify_content_format: &'static str,
    notify_strategy: &'a str,
    region: Option<&'a str>,
    filter_tag: Option<&'a str>,
    invocation_role: Option<&'a str>,
    qualifier: Option<&'a str>,
}

fn event_record(trigger: &Trigger) -> Result<Value, TemplateError> {
    let (event_type, properties) = match &trigger.kind {
        TriggerKind::Http(http) => (
            "HTTP",
            serde_json::to_value(HttpEventProperties {
                auth_type: &http.auth_type,
                methods: &http.methods,
                invocation_role: http.role.as_deref(),
                qualifier: http.version.as_deref(),
            })?,
        ),
        TriggerKind::Timer(timer) => (
            "Timer",
            serde_json::to_value(TimerEventProperties {
                cron_expression: timer.cron_expression.as_deref(),
                enable: timer.enable,
                payload: timer.payload.as_deref(),
                qualifier: timer.version.as_deref(),
            })?,
        ),
        TriggerKind::Log(log) => (
            "Log",
            serde_json::to_value(LogEventProperties {
                source_config: LogSourceConfig {
                    logstore: log.source.as_deref(),
                },
                job_config: LogJobConfig {
                    max_retry_time: log.max_retry_time,
                    trigger_interval: log.trigger_interval,
                },
                log_config: LogStoreConfig {
                    project: log.project.as_deref(),
                    logstore: log.logstore.as_deref(),
                },
                enable: true,
                invocation_role: log.role.as_deref(),
                qualifier: log.version.as_deref(),
            })?,
        ),
        TriggerKind::ObjectStorage(storage) => (
            "OSS",
            serde_json::to_value(ObjectStorageEventProperties {
                bucket_name: storage.bucket.as_deref(),
                events: &storage.events,
                filter: ObjectStorageFilter {
                    key: ObjectStorageKeyFilter {
                        prefix: storage.prefix.as_deref(),
                        suffix: storage.suffix.as_deref(),
                    },
                },
                enable: true,
                invocation_role: storage.role.as_deref(),
                qualifier: storage.version.as_deref(),
            })?,
        ),
        TriggerKind::MessageQueue(queue) => (
            "MNSTopic",
            serde_json::to_value(MessageQueueEventProperties {
                topic_name: queue.topic.as_deref(),
                notify_content_format: "JSON",
                notify_strategy: &queue.notify_strategy,
                region: queue.region.as_deref(),
                filter_tag: queue.filter_tag.as_deref(),
                invocation_role: queue.role.as_deref(),
                qualifier: queue.version.as_deref(),
            })?,
        ),
    };

    let mut record = Map::new();
    record.insert("Type".to_string(), json!(event_type));
    record.insert("Properties".to_string(), properties);
    Ok(Value::Object(record))
}

fn domain_resource(domain: &DomainBinding, routes: &[RouteEntry]) -> (String, Value) {
    let mut route_table = Map::new();
    for route in routes {
        // Same-path routes collapse, the last writer winning.
        route_table.insert(
            route.path.clone(),
            json!({
                "serviceName": route.service_name,
                "functionName": route.function_name,
            }),
        );
    }

    let mut properties = Map::new();
    let resource_name = match &domain.name {
        DomainName::Auto => {
            properties.insert("DomainName".to_string(), json!("Auto"));
            AUTO_DOMAIN_RESOURCE.to_string()
        }
        DomainName::Named(name) => name.clone(),
    };
    properties.insert("Protocol".to_string(), json!("HTTP"));
    properties.insert(
        "RouteConfig".to_string(),
        json!({"routes": Value::Object(route_table)}),
    );

    let mut resource = Map::new();
    resource.insert("Type".to_string(), json!(DOMAIN_TYPE));
    resource.insert("Properties".to_string(), Value::Object(properties));
    (resource_name, Value::Object(resource))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cumulus_app::assembly::HttpTrigger;
    use serde_json::json;

    fn build(value: Value) -> Value {
        let spec: SpecDocument = serde_json::from_value(value).unwrap();
        build_template(&spec, &EnvMap::new()).unwrap()
    }

    #[test]
    fn should_emit_fixed_template_header() {
        let template = build(json!({"service": {"name": "app"}}));
        assert_eq!(template["ROSTemplateFormatVersion"], "2015-09-01");
        assert_eq!(template["Transform"], "Aliyun::Serverless-2018-04-03");
        assert_eq!(template["Resources"]["app"]["Type"], SERVICE_TYPE);
    }

    #[test]
    fn should_nest_function_resources_inside_service() {
        let template = build(json!({
            "service": {"name": "app"},
            "functions": {"render": {"handler": "pages.render"}},
        }));
        let function = &template["Resources"]["app"]["render"];
        assert_eq!(function["Type"], FUNCTION_TYPE);
        assert_eq!(function["Properties"]["Handler"], "pages.render");
        assert_eq!(function["Properties"]["Initializer"], "pages.initializer");
        assert_eq!(function["Properties"]["Runtime"], "nodejs14");
        assert_eq!(function["Properties"]["CodeUri"], ".");
        assert_eq!(function["Properties"]["InstanceConcurrency"], 1);
    }

    #[test]
    fn should_key_function_resource_by_declared_name() {
        let template = build(json!({
            "service": {"name": "app"},
            "functions": {"internal": {"name": "public"}},
        }));
        assert!(template["Resources"]["app"]["public"].is_object());
        assert!(template["Resources"]["app"].get("internal").is_none());
    }

    #[test]
    fn should_uppercase_provider_config_keys() {
        let template = build(json!({
            "provider": {
                "vpcConfig": {"vpcId": "vpc-1", "vSwitchIds": ["v-1"]},
                "tracingConfig": {"type": "Enable"},
            },
            "service": {"name": "app"},
        }));
        let properties = &template["Resources"]["app"]["Properties"];
        assert_eq!(properties["VpcConfig"]["VpcId"], "vpc-1");
        assert_eq!(properties["VpcConfig"]["VSwitchIds"][0], "v-1");
        // TracingConfig is carried verbatim.
        assert_eq!(properties["TracingConfig"]["type"], "Enable");
    }

    #[test]
    fn should_render_http_event_with_normalized_methods() {
        let template = build(json!({
            "service": {"name": "app"},
            "functions": {"api": {"events": [{"http": {"method": ["get", "foo", "POST"]}}]}},
        }));
        let event = &template["Resources"]["app"]["api"]["Events"]["http-api"];
        assert_eq!(event["Type"], "HTTP");
        assert_eq!(event["Properties"]["AuthType"], "ANONYMOUS");
        assert_eq!(event["Properties"]["Methods"], json!(["GET", "POST"]));
    }

    #[test]
    fn should_render_timer_event_under_bare_default_name() {
        let template = build(json!({
            "service": {"name": "app"},
            "functions": {"sync": {"events": [
                {"timer": {"type": "every", "value": "5m", "payload": "tick"}},
            ]}},
        }));
        let event = &template["Resources"]["app"]["sync"]["Events"]["timer"];
        assert_eq!(event["Type"], "Timer");
        assert_eq!(event["Properties"]["CronExpression"], "@every 5m");
        assert_eq!(event["Properties"]["Enable"], true);
        assert_eq!(event["Properties"]["Payload"], "tick");
    }

    #[test]
    fn should_render_mns_topic_event() {
        let template = build(json!({
            "service": {"name": "app"},
            "functions": {"worker": {"events": [{"mq": {"topic": "jobs"}}]}},
        }));
        let event = &template["Resources"]["app"]["worker"]["Events"]["mq"];
        assert_eq!(event["Type"], "MNSTopic");
        assert_eq!(event["Properties"]["TopicName"], "jobs");
        assert_eq!(event["Properties"]["NotifyContentFormat"], "JSON");
        assert_eq!(event["Properties"]["NotifyStrategy"], "BACKOFF_RETRY");
    }

    #[test]
    fn should_let_last_same_named_trigger_win() {
        let template = build(json!({
            "service": {"name": "app"},
            "functions": {"f": {"events": [
                {"timer": {"name": "shared", "value": "@daily"}},
                {"timer": {"name": "shared", "value": "@weekly"}},
            ]}},
        }));
        let events = template["Resources"]["app"]["f"]["Events"].as_object().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events["shared"]["Properties"]["CronExpression"], "@weekly");
    }

    #[test]
    fn should_prune_empty_attributes_from_output() {
        let template = build(json!({
            "service": {"name": "app"},
            "functions": {"f": {}},
        }));
        let properties = &template["Resources"]["app"]["f"]["Properties"];
        // No environment and no events: both pruned away entirely.
        assert!(properties.get("EnvironmentVariables").is_none());
        assert!(template["Resources"]["app"]["f"].get("Events").is_none());
        // The empty description survives pruning.
        assert_eq!(properties["Description"], "");
    }

    #[test]
    fn should_emit_domain_resource_for_named_domain() {
        let template = build(json!({
            "service": {"name": "app"},
            "functions": {"api": {"events": [{"http": {"path": "/v1"}}]}},
            "custom": {"customDomain": {"domainName": "api.example.com"}},
        }));
        let domain = &template["Resources"]["api.example.com"];
        assert_eq!(domain["Type"], DOMAIN_TYPE);
        assert!(domain["Properties"].get("DomainName").is_none());
        assert_eq!(domain["Properties"]["Protocol"], "HTTP");
        assert_eq!(
            domain["Properties"]["RouteConfig"]["routes"]["/v1"],
            json!({"serviceName": "app", "functionName": "api"})
        );
    }

    #[test]
    fn should_emit_auto_domain_resource_when_key_is_absent() {
        let template = build(json!({
            "service": {"name": "app"},
            "functions": {"api": {"events": [{"http": {}}]}},
        }));
        let domain = &template["Resources"][AUTO_DOMAIN_RESOURCE];
        assert_eq!(domain["Properties"]["DomainName"], "Auto");
        assert_eq!(domain["Properties"]["RouteConfig"]["routes"]["/*"]["functionName"], "api");
    }

    #[test]
    fn should_not_emit_domain_resource_when_disabled() {
        let template = build(json!({
            "service": {"name": "app"},
            "functions": {"api": {"events": [{"http": {}}]}},
            "custom": {"customDomain": false},
        }));
        assert!(template["Resources"].get(AUTO_DOMAIN_RESOURCE).is_none());
    }

    #[test]
    fn should_not_emit_domain_resource_without_http_events() {
        let template = build(json!({
            "service": {"name": "app"},
            "functions": {"cron": {"events": [{"timer": {"value": "@daily"}}]}},
            "custom": {"customDomain": {"domainName": "auto"}},
        }));
        assert!(template["Resources"].get(AUTO_DOMAIN_RESOURCE).is_none());
    }

    #[test]
    fn should_render_explicit_http_trigger_record() {
        let trigger = Trigger {
            name: None,
            kind: TriggerKind::Http(HttpTrigger {
                auth_type: "FUNCTION".to_string(),
                methods: vec![HttpMethod::Get],
                role: Some("acs:ram::role".to_string()),
                version: Some("LATEST".to_string()),
            }),
        };
        let record = event_record(&trigger).unwrap();
        assert_eq!(record["Properties"]["InvocationRole"], "acs:ram::role");
        assert_eq!(record["Properties"]["Qualifier"], "LATEST");
    }
}
