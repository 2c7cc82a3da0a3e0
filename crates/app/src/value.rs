//! JSON value utilities shared by the output adapters.
//!
//! Pruning is the template finalizer: both variants run their finished
//! tree through [`prune_empty_attributes`] exactly once before returning.
//! Key re-casing serves the free-form provider config maps, whose key
//! style differs between the two output schemas.

use serde_json::{Map, Value};

/// Recursively drop object members whose value is null, an empty object,
/// or an empty array (judged after pruning their own children). Key order
/// of the survivors is untouched. Array elements are pruned in place but
/// never removed, and scalars (including empty strings, `false`, and `0`)
/// always survive.
#[must_use]
pub fn prune_empty_attributes(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut pruned = Map::new();
            for (key, member) in map {
                let member = prune_empty_attributes(member);
                if !is_empty(&member) {
                    pruned.insert(key, member);
                }
            }
            Value::Object(pruned)
        }
        Value::Array(items) => {
            Value::Array(items.into_iter().map(prune_empty_attributes).collect())
        }
        other => other,
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Upper-case the first letter of every object key, recursively.
#[must_use]
pub fn uppercase_object_key(value: Value) -> Value {
    recase_keys(value, true)
}

/// Lower-case the first letter of every object key, recursively.
#[must_use]
pub fn lowercase_object_key(value: Value) -> Value {
    recase_keys(value, false)
}

fn recase_keys(value: Value, upper: bool) -> Value {
    match value {
        Value::Object(map) => {
            let mut recased = Map::new();
            for (key, member) in map {
                recased.insert(recase_first(&key, upper), recase_keys(member, upper));
            }
            Value::Object(recased)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| recase_keys(item, upper))
                .collect(),
        ),
        other => other,
    }
}

fn recase_first(key: &str, upper: bool) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => {
            let first = if upper {
                first.to_ascii_uppercase()
            } else {
                first.to_ascii_lowercase()
            };
            format!("{first}{rest}", rest = chars.as_str())
        }
        None => String::new(),
    }
}
