//! The route registry: registry key to the files a provider exposes.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use trellis_core::{join_segments, strip_extension};

/// One exposed route group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    /// Id of the package exposing the group.
    pub provider_id: String,
    /// Directory of the group relative to the provider root (`""` = root).
    pub internal_path: String,
    /// Route files relative to `internal_path`, sorted.
    pub route_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RegistryItem {
    /// Import specifier for one of this item's route files.
    ///
    /// `<providerId>/<internalPath>/<routeFile without extension>`, with
    /// empty segments elided.
    pub fn import_specifier(&self, route_file: &str) -> String {
        import_specifier(&self.provider_id, &self.internal_path, route_file)
    }
}

/// Build the import specifier that points at an original route file.
pub fn import_specifier(provider_id: &str, internal_path: &str, route_file: &str) -> String {
    let file = strip_extension(route_file);
    let rest = join_segments([internal_path, file]);
    if rest.is_empty() {
        provider_id.to_string()
    } else {
        format!("{}/{}", provider_id, rest)
    }
}

/// Registry of exposed route groups, ordered by key.
///
/// Rebuilt from a full scan on every run and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Registry {
    items: BTreeMap<String, RegistryItem>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item, returning the item it replaced.
    pub fn insert(&mut self, key: impl Into<String>, item: RegistryItem) -> Option<RegistryItem> {
        self.items.insert(key.into(), item)
    }

    pub fn get(&self, key: &str) -> Option<&RegistryItem> {
        self.items.get(key)
    }

    /// Registry keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegistryItem)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Distinct provider ids, sorted.
    pub fn providers(&self) -> BTreeSet<&str> {
        self.items
            .values()
            .map(|item| item.provider_id.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pretty JSON object mapping every key to its item.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
