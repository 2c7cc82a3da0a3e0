//! Scalar-or-sequence values, as descriptor authors write them.
//!
//! Several descriptor fields (HTTP methods, object-storage event types)
//! accept either a single value or a list. [`OneOrMany`] deserializes both
//! shapes and always exposes them as a slice.

use serde::{Deserialize, Serialize};

/// A value that may be written as a scalar or as a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// View the value as a slice, regardless of the written shape.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(value) => std::slice::from_ref(value),
            Self::Many(values) => values.as_slice(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<T: Clone> OneOrMany<T> {
    /// Coerce to an owned sequence.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}
