//! Localized display names keyed by text-map hash.

use serde::Deserialize;
use std::collections::HashMap;

/// Text map: stringified hash -> localized display string
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct TextMap {
    entries: HashMap<String, String>,
}

impl TextMap {
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, hash: &str) -> Option<&str> {
        self.entries.get(hash).map(String::as_str)
    }

    /// Display name for `hash`, or `#<id>` when the hash is not mapped.
    ///
    /// The fallback uses the record id, never the hash.
    pub fn resolve_name(&self, hash: &str, id: &str) -> String {
        self.get(hash)
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", id))
    }
}
