//! Scoping context for authorization queries.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The context an authorization question is asked in, typically an account or
/// tenant scope. Every resolution pass is relative to exactly one environment.
///
/// Attributes carry provider-specific context (server URL, plan tier, ...)
/// that the engine itself never interprets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Environment {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl Environment {
    /// Creates an environment scoped to the given identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self { identifier: identifier.into(), attributes: BTreeMap::new() }
    }

    /// Adds a context attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Looks up a context attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
