//! Resolved mounts and the package mount-prefix index.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use trellis_core::{is_empty_segment, join_segments};

use crate::registry::import_specifier;

/// A provider's route group placed at one prefix of the host tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedMount {
    /// Registry key the mount was resolved from.
    pub key: String,
    pub provider_id: String,
    /// Provider-relative directory of the route files.
    pub internal_path: String,
    /// Route files relative to `internal_path`.
    pub route_files: Vec<String>,
    /// Path segments below the output root.
    pub mount_prefix: Vec<String>,
}

impl ResolvedMount {
    /// The mount prefix joined with `/` (`""` for the root).
    pub fn prefix(&self) -> String {
        self.mount_prefix.join("/")
    }

    /// Output path of a route file relative to the output root.
    pub fn output_path(&self, route_file: &str) -> String {
        join_segments([self.prefix().as_str(), route_file])
    }

    /// Import specifier pointing at the original route file.
    pub fn import_specifier(&self, route_file: &str) -> String {
        import_specifier(&self.provider_id, &self.internal_path, route_file)
    }
}

/// Split a joined prefix into its non-empty segments.
pub fn prefix_segments(prefix: &str) -> Vec<String> {
    prefix
        .split('/')
        .filter(|s| !is_empty_segment(s))
        .map(str::to_string)
        .collect()
}

/// Where each package is currently known to be mounted.
///
/// Prefixes are stored joined with `/`; the root is `""`. The index only
/// grows during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PackageMountIndex {
    prefixes: IndexMap<String, IndexSet<String>>,
}

impl PackageMountIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `package_id` is mounted at `prefix`.
    ///
    /// Returns `false` when the prefix was already known.
    pub fn record(&mut self, package_id: &str, prefix: &str) -> bool {
        self.prefixes
            .entry(package_id.to_string())
            .or_default()
            .insert(prefix.to_string())
    }

    /// Prefixes currently recorded for a package, in insertion order.
    pub fn prefixes(&self, package_id: &str) -> Vec<String> {
        self.prefixes
            .get(package_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn contains(&self, package_id: &str) -> bool {
        self.prefixes.contains_key(package_id)
    }

    /// Packages in the order they were first mounted, with their prefixes.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IndexSet<String>)> {
        self.prefixes.iter().map(|(id, set)| (id.as_str(), set))
    }
}
