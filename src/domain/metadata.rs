//! Sidecar metadata: a free-text description plus a tag list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Metadata stored in a toolset's `data.json` sidecar.
///
/// Tags are persisted as an ordered list but treated as a set on read:
/// duplicates collapse and order is irrelevant for filtering. Unknown sidecar
/// fields are ignored on read; only these two fields are ever written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub description: String,
    pub tags: Vec<String>,
}

impl Metadata {
    /// Create metadata from a description and a tag list.
    pub fn new(description: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            description: description.into(),
            tags,
        }
    }

    /// Tags as a lowercase set: trimmed, deduplicated, empty tokens dropped.
    pub fn tag_set(&self) -> BTreeSet<String> {
        self.tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Split a comma/whitespace separated string into tag tokens.
    pub fn parse_tags(raw: &str) -> Vec<String> {
        raw.split(|c: char| c == ',' || c.is_whitespace())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}
