//! # cumulus-domain
//!
//! Pure model of the provider-agnostic serverless application descriptor.
//!
//! ## Responsibilities
//! - Define the **Abstract Spec** (provider defaults, service metadata,
//!   functions map, custom-domain configuration)
//! - Define **Functions** (handler, runtime/timeout/memory overrides, events)
//! - Define **Trigger events** (HTTP, timer, log, object storage, message
//!   queue) and their per-kind payloads
//! - HTTP method normalization against the provider whitelist
//!
//! ## Dependency rule
//! This crate has **no internal dependencies** and performs no IO.
//! Parsing the descriptor out of YAML/JSON files is a collaborator's job;
//! this crate only models the already-loaded document.

pub mod custom_domain;
pub mod event;
pub mod function;
pub mod one_or_many;
pub mod provider;
pub mod service;
pub mod spec;

/// Ordered environment-variable mapping. Merge precedence between the
/// provider, function, and user-defined maps is resolved by the app layer.
pub type EnvMap = indexmap::IndexMap<String, String>;
