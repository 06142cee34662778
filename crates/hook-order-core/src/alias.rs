//! Alternate identifiers accepted in place of a canonical namespace root.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Canonical root under which lifecycle hooks are namespaced.
pub const CANONICAL_ROOT: &str = "test";

/// Mapping from a canonical root identifier to the aliases treated as
/// equivalent to it. Deserializes from `{ test = ["it"] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: BTreeMap<String, BTreeSet<String>>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aliases<I, S>(canonical: &str, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for alias in aliases {
            table.insert(canonical, alias);
        }
        table
    }

    /// Registers `alias` under `canonical`. Returns false if it was already present.
    pub fn insert(&mut self, canonical: &str, alias: impl Into<String>) -> bool {
        self.entries
            .entry(canonical.to_string())
            .or_default()
            .insert(alias.into())
    }

    /// Merge another table into self. Alias sets are unioned per canonical name.
    pub fn extend(&mut self, other: AliasTable) {
        for (canonical, aliases) in other.entries {
            self.entries.entry(canonical).or_default().extend(aliases);
        }
    }

    /// Whether `name` may stand in for `canonical`.
    fn resolves_to(&self, name: &str, canonical: &str) -> bool {
        name == canonical
            || self
                .entries
                .get(canonical)
                .is_some_and(|aliases| aliases.contains(name))
    }

    /// Whether `name` is accepted as the hook namespace root.
    pub fn accepts_root(&self, name: &str) -> bool {
        self.resolves_to(name, CANONICAL_ROOT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.entries
            .iter()
            .map(|(canonical, aliases)| (canonical.as_str(), aliases))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeSet::is_empty)
    }
}
