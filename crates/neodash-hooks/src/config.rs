//! Storage configuration shared by the persisted-state bindings.

use serde::{Deserialize, Serialize};

use crate::store::Namespace;

/// Prefix applied to every key the application stores.
pub const DEFAULT_KEY_PREFIX: &str = "neodash.";

/// How the UI names and places its persisted entries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Prefix prepended to logical key names.
    pub key_prefix: String,
    /// Namespace used when a binding does not pick one.
    pub default_namespace: Namespace,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
            default_namespace: Namespace::Durable,
        }
    }
}

impl StorageConfig {
    /// Full store key for a logical name. Already-prefixed names are returned unchanged.
    #[must_use]
    pub fn scoped_key(&self, name: &str) -> String {
        if name.starts_with(&self.key_prefix) {
            name.to_string()
        } else {
            format!("{}{name}", self.key_prefix)
        }
    }
}
