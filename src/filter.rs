//! Filter engine: pure narrowing of a catalog snapshot.
//!
//! Name and description match by case-insensitive substring. The tag query
//! splits on commas and whitespace into tokens and uses AND semantics: a
//! toolset matches only if its tag set holds every requested token. Empty
//! queries match everything.

use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::domain::Toolset;

/// Criteria for narrowing a catalog. Empty fields are ignored.
#[derive(Debug, Clone, Default)]
pub struct FilterQuery {
    /// Case-insensitive substring of the toolset name
    pub name: String,
    /// Comma/whitespace separated tag tokens, all of which must be present
    pub tags: String,
    /// Case-insensitive substring of the description
    pub description: String,
    /// Exact owner, or all owners when unset
    pub owner: Option<String>,
}

impl FilterQuery {
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.tags.trim().is_empty()
            && self.description.trim().is_empty()
            && self.owner.is_none()
    }
}

/// Apply a query to a catalog. Pure function of its inputs.
pub fn apply<'a>(catalog: &'a Catalog, query: &FilterQuery) -> Vec<&'a Toolset> {
    let name = query.name.trim().to_lowercase();
    let description = query.description.trim().to_lowercase();
    let wanted_tags = tag_tokens(&query.tags);

    catalog
        .toolsets()
        .iter()
        .filter(|t| matches(t, &name, &wanted_tags, &description, query.owner.as_deref()))
        .collect()
}

fn matches(
    toolset: &Toolset,
    name: &str,
    wanted_tags: &BTreeSet<String>,
    description: &str,
    owner: Option<&str>,
) -> bool {
    if let Some(owner) = owner {
        if toolset.owner != owner {
            return false;
        }
    }

    if !name.is_empty() && !toolset.name.to_lowercase().contains(name) {
        return false;
    }

    if !wanted_tags.is_empty() && !toolset.metadata.tag_set().is_superset(wanted_tags) {
        return false;
    }

    if !description.is_empty() && !toolset.metadata.description.to_lowercase().contains(description) {
        return false;
    }

    true
}

/// Lowercased tag tokens of a raw query string.
fn tag_tokens(raw: &str) -> BTreeSet<String> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
