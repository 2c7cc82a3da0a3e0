//! # cumulus-adapter-component-spec
//!
//! Component project-list output variant.
//!
//! Renders an assembled deployment model as one project descriptor per
//! function: a `project` block naming the provider, access profile, and
//! project, and a `props` block carrying the shared service settings, the
//! resolved function, its triggers, and — where the function contributed
//! HTTP routes — the aggregated custom-domain entry. The finished list runs
//! through the empty-attribute finalizer before it is returned.

use cumulus_app::assembly::{
    Assembly, DomainName, ResolvedFunction, Trigger, TriggerKind, TriggerNameStyle,
};
use cumulus_app::value::{lowercase_object_key, prune_empty_attributes};
use cumulus_domain::EnvMap;
use cumulus_domain::event::HttpMethod;
use cumulus_domain::spec::SpecDocument;
use serde::Serialize;
use serde_json::{Map, Value, json};

const PROVIDER: &str = "alibaba";

/// Rendering failure. The mapping itself cannot fail; only the conversion
/// of typed descriptor fragments into JSON values can.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("failed to serialize a project fragment")]
    Serialize(#[from] serde_json::Error),
}

/// Build the component project list for a descriptor.
///
/// `user_env` is the externally filtered user-defined environment map.
///
/// # Errors
///
/// Returns [`TemplateError::Serialize`] when a descriptor fragment cannot
/// be converted to JSON.
pub fn build_template(spec: &SpecDocument, user_env: &EnvMap) -> Result<Value, TemplateError> {
    let assembly = cumulus_app::assemble(spec, user_env);

    let service = serde_json::to_value(component_service(&assembly))?;
    let custom_domain = match assembly.domain.as_ref() {
        Some(domain) => {
            let routes = serde_json::to_value(route_configs(&assembly))?;
            Some(json!({
                "domainName": match &domain.name {
                    DomainName::Auto => "auto".to_string(),
                    DomainName::Named(name) => name.clone(),
                },
                "protocol": "HTTP",
                "routeConfigs": routes,
            }))
        }
        None => None,
    };

    let mut projects = Vec::new();
    for function in &assembly.functions {
        projects.push(project_descriptor(
            &assembly,
            function,
            &service,
            custom_domain.as_ref(),
        )?);
    }

    Ok(prune_empty_attributes(Value::Array(projects)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComponentService {
    name: String,
    description: Option<String>,
    internet_access: Option<bool>,
    role: Option<String>,
    log_config: Option<Value>,
    vpc_config: Option<Value>,
    nas_config: Option<Value>,
    tracing_config: Option<Value>,
}

fn component_service(assembly: &Assembly) -> ComponentService {
    let service = &assembly.service;
    ComponentService {
        name: service.name.clone(),
        description: service.description.clone(),
        internet_access: service.internet_access,
        role: service.role.clone(),
        log_config: service.log_config.clone().map(lowercase_object_key),
        vpc_config: service.vpc_config.clone().map(lowercase_object_key),
        nas_config: service.nas_config.clone().map(lowercase_object_key),
        tracing_config: service.tracing_config.clone(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ComponentFunction<'a> {
    name: &'a str,
    description: &'a str,
    handler: &'a str,
    initializer: &'a str,
    initialization_timeout: u32,
    memory_size: u32,
    runtime: &'a str,
    timeout: u32,
    code_uri: &'a str,
    instance_concurrency: u32,
    environment_variables: &'a EnvMap,
    async_configuration: Option<&'a Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteConfig<'a> {
    path: &'a str,
    service_name: &'a str,
    function_name: &'a str,
    methods: &'a [HttpMethod],
}

fn route_configs(assembly: &Assembly) -> Vec<RouteConfig<'_>> {
    assembly
        .routes
        .iter()
        .map(|route| RouteConfig {
            path: &route.path,
            service_name: &route.service_name,
            function_name: &route.function_name,
            methods: &route.methods,
        })
        .collect()
}

fn project_descriptor(
    assembly: &Assembly,
    function: &ResolvedFunction,
    service: &Value,
    custom_domain: Option<&Value>,
) -> Result<Value, TemplateError> {
    let component_function = ComponentFunction {
        name: &function.key,
        description: &function.description,
        handler: &function.handler,
        initializer: &function.initializer,
        initialization_timeout: function.init_timeout,
        memory_size: function.memory_size,
        runtime: &function.runtime,
        timeout: function.timeout,
        code_uri: &function.code_uri,
        instance_concurrency: function.concurrency,
        environment_variables: &function.environment,
        async_configuration: assembly.service.async_configuration.as_ref(),
    };

    let triggers = function
        .triggers
        .iter()
        .map(|trigger| trigger_record(trigger, &function.key))
        .collect::<Result<Vec<_>, _>>()?;

    // The aggregated domain entry lands on every project that contributed
    // at least one HTTP route.
    let custom_domains: Vec<Value> = if function.has_http_trigger() {
        custom_domain.cloned().into_iter().collect()
    } else {
        Vec::new()
    };

    let mut props = Map::new();
    props.insert("service".to_string(), service.clone());
    props.insert("region".to_string(), json!(assembly.region));
    props.insert(
        "function".to_string(),
        serde_json::to_value(component_function)?,
    );
    props.insert("triggers".to_string(), Value::Array(triggers));
    props.insert("customDomains".to_string(), Value::Array(custom_domains));

    Ok(json!({
        "project": {
            "provider": PROVIDER,
            "access": assembly.access,
            "projectName": assembly.service.name,
        },
        "props": Value::Object(props),
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HttpTriggerConfig<'a> {
    auth_type: &'a str,
    methods: &'a [HttpMethod],
    invocation_role: Option<&'a str>,
    qualifier: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimerTriggerConfig<'a> {
    cron_expression: Option<&'a str>,
    enable: bool,
    payload: Option<&'a str>,
    qualifier: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogTriggerConfig<'a> {
    source_config: LogSourceConfig<'a>,
    job_config: LogJobConfig,
    log_config: LogStoreConfig<'a>,
    enable: bool,
    invocation_role: Option<&'a str>,
    qualifier: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogSourceConfig<'a> {
    logstore: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogJobConfig {
    max_retry_time: u32,
    trigger_interval: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogStoreConfig<'a> {
    project: Option<&'a str>,
    logstore: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ObjectStorageTriggerConfig<'a> {
    bucket_name: Option<&'a str>,
    events: &'a [String],
    filter: ObjectStorageFilter<'a>,
    enable: bool,
    invocation_role: Option<&'a str>,
    qualifier: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ObjectStorageFilter<'a> {
    key: ObjectStorageKeyFilter<'a>,
}

/// Key filter casing follows the provider schema, which capitalizes these
/// two members even inside the otherwise camel-cased component spec.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ObjectStorageKeyFilter<'a> {
    prefix: Option<&'a str>,
    suffix: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MessageQueueTriggerConfig<'a> {
    topic_name: Option<&'a str>,
    notify_content_format: &'static str,
    notify_strategy: &'a str,
    region: Option<&'a str>,
    filter_tag: Option<&'a str>,
    invocation_role: Option<&'a str>,
    qualifier: Option<&'a str>,
}

fn trigger_record(trigger: &Trigger, function_key: &str) -> Result<Value, TemplateError> {
    let config = match &trigger.kind {
        TriggerKind::Http(http) => serde_json::to_value(HttpTriggerConfig {
            auth_type: &http.auth_type,
            methods: &http.methods,
            invocation_role: http.role.as_deref(),
            qualifier: http.version.as_deref(),
        })?,
        TriggerKind::Timer(timer) => serde_json::to_value(TimerTriggerConfig {
            cron_expression: timer.cron_expression.as_deref(),
            enable: timer.enable,
            payload: timer.payload.as_deref(),
            qualifier: timer.version.as_deref(),
        })?,
        TriggerKind::Log(log) => serde_json::to_value(LogTriggerConfig {
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
        TriggerKind::ObjectStorage(storage) => {
            serde_json::to_value(ObjectStorageTriggerConfig {
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
            })?
        }
        TriggerKind::MessageQueue(queue) => serde_json::to_value(MessageQueueTriggerConfig {
            topic_name: queue.topic.as_deref(),
            notify_content_format: "JSON",
            notify_strategy: &queue.notify_strategy,
            region: queue.region.as_deref(),
            filter_tag: queue.filter_tag.as_deref(),
            invocation_role: queue.role.as_deref(),
            qualifier: queue.version.as_deref(),
        })?,
    };

    Ok(json!({
        "name": trigger.resolved_name(function_key, TriggerNameStyle::FunctionSuffixed),
        "type": trigger.kind.label(),
        "config": config,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(value: Value) -> Value {
        let spec: SpecDocument = serde_json::from_value(value).unwrap();
        build_template(&spec, &EnvMap::new()).unwrap()
    }

    #[test]
    fn should_emit_one_project_per_function() {
        let projects = build(json!({
            "service": {"name": "app"},
            "functions": {"a": {}, "b": {}},
        }));
        let projects = projects.as_array().unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0]["props"]["function"]["name"], "a");
        assert_eq!(projects[1]["props"]["function"]["name"], "b");
    }

    #[test]
    fn should_emit_project_block_with_access_default() {
        let projects = build(json!({
            "service": {"name": "app"},
            "functions": {"f": {}},
        }));
        let project = &projects[0]["project"];
        assert_eq!(project["provider"], "alibaba");
        assert_eq!(project["access"], "default");
        assert_eq!(project["projectName"], "app");
    }

    #[test]
    fn should_carry_provider_access_and_region() {
        let projects = build(json!({
            "provider": {"access": "staging", "region": "cn-hangzhou"},
            "service": {"name": "app"},
            "functions": {"f": {}},
        }));
        assert_eq!(projects[0]["project"]["access"], "staging");
        assert_eq!(projects[0]["props"]["region"], "cn-hangzhou");
    }

    #[test]
    fn should_lowercase_provider_config_keys_in_service() {
        let projects = build(json!({
            "provider": {"logConfig": {"Project": "p", "Logstore": "l"}},
            "service": {"name": "app"},
            "functions": {"f": {}},
        }));
        let service = &projects[0]["props"]["service"];
        assert_eq!(service["logConfig"]["project"], "p");
        assert_eq!(service["logConfig"]["logstore"], "l");
    }

    #[test]
    fn should_resolve_function_defaults_in_camel_case() {
        let projects = build(json!({
            "service": {"name": "app"},
            "functions": {"render": {"handler": "pages.render"}},
        }));
        let function = &projects[0]["props"]["function"];
        assert_eq!(function["handler"], "pages.render");
        assert_eq!(function["initializer"], "pages.initializer");
        assert_eq!(function["initializationTimeout"], 3);
        assert_eq!(function["memorySize"], 128);
        assert_eq!(function["runtime"], "nodejs14");
        assert_eq!(function["timeout"], 3);
        assert_eq!(function["codeUri"], ".");
        assert_eq!(function["instanceConcurrency"], 1);
    }

    #[test]
    fn should_suffix_default_trigger_names_with_function_key() {
        let projects = build(json!({
            "service": {"name": "app"},
            "functions": {"sync": {"events": [
                {"timer": {"value": "@daily"}},
                {"log": {"source": "s"}},
            ]}},
        }));
        let triggers = projects[0]["props"]["triggers"].as_array().unwrap();
        assert_eq!(triggers[0]["name"], "timer-sync");
        assert_eq!(triggers[0]["type"], "timer");
        assert_eq!(triggers[1]["name"], "log-sync");
        assert_eq!(triggers[1]["type"], "log");
    }

    #[test]
    fn should_render_http_trigger_config_with_methods() {
        let projects = build(json!({
            "service": {"name": "app"},
            "functions": {"api": {"events": [{"http": {"method": "any"}}]}},
        }));
        let trigger = &projects[0]["props"]["triggers"][0];
        assert_eq!(trigger["name"], "http-api");
        assert_eq!(trigger["config"]["authType"], "ANONYMOUS");
        assert_eq!(
            trigger["config"]["methods"],
            json!(["GET", "PUT", "POST", "DELETE", "HEAD", "PATCH"])
        );
    }

    #[test]
    fn should_render_mq_trigger_with_bare_default_name() {
        let projects = build(json!({
            "service": {"name": "app"},
            "functions": {"worker": {"events": [{"mq": {"topic": "jobs"}}]}},
        }));
        let trigger = &projects[0]["props"]["triggers"][0];
        assert_eq!(trigger["name"], "mq");
        assert_eq!(trigger["config"]["topicName"], "jobs");
        assert_eq!(trigger["config"]["notifyContentFormat"], "JSON");
        assert_eq!(trigger["config"]["notifyStrategy"], "BACKOFF_RETRY");
    }

    #[test]
    fn should_capitalize_object_storage_key_filter_members() {
        let projects = build(json!({
            "service": {"name": "app"},
            "functions": {"f": {"events": [
                {"oss": {"bucket": "b", "events": "oss:ObjectCreated:*",
                         "filter": {"prefix": "img/", "suffix": ".png"}}},
            ]}},
        }));
        let config = &projects[0]["props"]["triggers"][0]["config"];
        assert_eq!(config["filter"]["key"]["Prefix"], "img/");
        assert_eq!(config["filter"]["key"]["Suffix"], ".png");
    }

    #[test]
    fn should_attach_aggregated_domains_only_to_http_functions() {
        let projects = build(json!({
            "service": {"name": "app"},
            "functions": {
                "api": {"events": [{"http": {"path": "/a", "method": "get"}}]},
                "web": {"events": [{"http": {"path": "/b"}}]},
                "cron": {"events": [{"timer": {"value": "@daily"}}]},
            },
            "custom": {"customDomain": {"domainName": "auto"}},
        }));
        let api_domains = projects[0]["props"]["customDomains"].as_array().unwrap();
        assert_eq!(api_domains.len(), 1);
        assert_eq!(api_domains[0]["domainName"], "auto");
        assert_eq!(api_domains[0]["protocol"], "HTTP");
        // Both functions carry the full aggregated route table.
        let routes = api_domains[0]["routeConfigs"].as_array().unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0]["path"], "/a");
        assert_eq!(routes[0]["methods"], json!(["GET"]));
        assert_eq!(routes[1]["path"], "/b");
        assert_eq!(
            projects[1]["props"]["customDomains"].as_array().unwrap().len(),
            1
        );
        // The timer-only function gets none (pruned away entirely).
        assert!(projects[2]["props"].get("customDomains").is_none());
    }

    #[test]
    fn should_use_named_domain_in_entries() {
        let projects = build(json!({
            "service": {"name": "app"},
            "functions": {"api": {"events": [{"http": {}}]}},
            "custom": {"customDomain": {"domainName": "api.example.com"}},
        }));
        assert_eq!(
            projects[0]["props"]["customDomains"][0]["domainName"],
            "api.example.com"
        );
    }

    #[test]
    fn should_omit_domains_when_disabled() {
        let projects = build(json!({
            "service": {"name": "app"},
            "functions": {"api": {"events": [{"http": {}}]}},
            "custom": {"customDomain": false},
        }));
        assert!(projects[0]["props"].get("customDomains").is_none());
    }

    #[test]
    fn should_prune_empty_trigger_list() {
        let projects = build(json!({
            "service": {"name": "app"},
            "functions": {"f": {}},
        }));
        assert!(projects[0]["props"].get("triggers").is_none());
    }
}
