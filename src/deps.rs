//! Dependency keys and the tracker that maps them to loaders.
//!
//! A loader declares the keys it depends on while it runs. Invalidating a
//! key later selects exactly the loaders that declared it.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;

use crate::error::LoadError;

/// Key declared by the project list loader.
pub const PROJECT_LIST_KEY: &str = "app:projectlist";

/// Key declared by the single project loader.
pub const PROJECT_KEY: &str = "app:project";

/// Key declared by the gallery loader.
pub const MEDIA_KEY: &str = "app:media";

/// A named invalidation channel such as `app:project`.
///
/// Keys have the form `scheme:name`: a lower-case ASCII scheme, a colon,
/// and a non-empty remainder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DependencyKey(String);

impl DependencyKey {
    /// Validate and wrap a key.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidDependencyKey`] if `key` is not `scheme:name`.
    pub fn parse(key: &str) -> Result<Self, LoadError> {
        let valid = key.split_once(':').is_some_and(|(scheme, rest)| {
            !scheme.is_empty()
                && scheme.bytes().all(|b| b.is_ascii_lowercase())
                && !rest.is_empty()
                && !rest.chars().any(char::is_whitespace)
        });

        if valid {
            Ok(Self(key.to_string()))
        } else {
            Err(LoadError::InvalidDependencyKey(key.to_string()))
        }
    }

    /// The key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DependencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registry from dependency keys to the route nodes that declared them.
///
/// Nodes are identified by their index in the route table.
#[derive(Debug, Default)]
pub struct DependencyTracker {
    by_key: HashMap<DependencyKey, BTreeSet<usize>>,
}

impl DependencyTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the keys declared by `node`, replacing any it declared before.
    pub fn register(&mut self, node: usize, keys: impl IntoIterator<Item = DependencyKey>) {
        self.forget(node);
        for key in keys {
            self.by_key.entry(key).or_default().insert(node);
        }
    }

    /// Remove every registration made by `node`.
    pub fn forget(&mut self, node: usize) {
        self.by_key.retain(|_, nodes| {
            nodes.remove(&node);
            !nodes.is_empty()
        });
    }

    /// Nodes registered under `key`, in ascending order.
    pub fn dependents(&self, key: &DependencyKey) -> Vec<usize> {
        self.by_key
            .get(key)
            .map(|nodes| nodes.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Keys registered by `node`, sorted.
    pub fn keys_of(&self, node: usize) -> Vec<&DependencyKey> {
        let mut keys: Vec<_> = self
            .by_key
            .iter()
            .filter(|(_, nodes)| nodes.contains(&node))
            .map(|(key, _)| key)
            .collect();
        keys.sort();
        keys
    }

    /// Drop all registrations.
    pub fn clear(&mut self) {
        self.by_key.clear();
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
