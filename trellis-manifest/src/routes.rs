//! Per-package `routes.toml` manifest.
//!
//! A package declares the route groups it exposes under registry keys and
//! the groups it mounts from other packages:
//!
//! ```toml
//! [[expose_routes]]
//! name = "billing"
//! internal_path = "app"
//!
//! [[mount_routes]]
//! name = "admin"
//! base_route = "admin"
//! [mount_routes.features]
//! billing = "billing"
//! ```

use std::{
    collections::HashSet,
    path::{Component, Path},
    str::FromStr,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result, error::SourceContext};

/// File name of the per-package routes manifest.
pub const ROUTES_FILE: &str = "routes.toml";

/// Declarative route configuration of one package.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutesManifest {
    /// Route groups this package makes available to others.
    #[serde(default, alias = "exposeRoutes")]
    pub expose_routes: Vec<ExposeEntry>,

    /// Route groups from other packages mounted inside this package.
    #[serde(default, alias = "mountRoutes")]
    pub mount_routes: Vec<MountGroup>,
}

/// A named group of route files exposed by a provider package.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExposeEntry {
    /// Registry key, unique across the workspace.
    pub name: String,

    /// Directory, relative to the package root, holding the route files.
    #[serde(default, alias = "internalPath")]
    pub internal_path: String,

    #[serde(default)]
    pub description: Option<String>,
}

/// A set of registry keys mounted under a common base route.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MountGroup {
    pub name: String,

    /// Path segment(s) below the consumer's own prefix. `"."` or empty
    /// mounts at the consumer root.
    #[serde(default, alias = "baseRoute")]
    pub base_route: Option<String>,

    /// Registry key to slug, in declaration order.
    #[serde(default)]
    pub features: IndexMap<String, String>,
}

impl RoutesManifest {
    /// Load the manifest of the package in `package_dir`.
    ///
    /// The file is read from disk on every call. Returns `Ok(None)` when the
    /// package has no `routes.toml`.
    pub fn load(package_dir: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = package_dir.as_ref().join(ROUTES_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        parse_routes(&content, &path.display().to_string()).map(Some)
    }

    /// Parse a manifest with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_routes(content, filename)
    }

    /// Whether the manifest declares nothing.
    pub fn is_empty(&self) -> bool {
        self.expose_routes.is_empty() && self.mount_routes.is_empty()
    }
}

impl FromStr for RoutesManifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_routes(s, ROUTES_FILE)
    }
}

/// Parse and validate a routes manifest.
pub fn parse_routes(content: &str, filename: &str) -> Result<RoutesManifest> {
    let ctx = SourceContext::new(content, filename);
    let manifest: RoutesManifest = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
    validate(&manifest, &ctx)?;
    Ok(manifest)
}

fn validate(manifest: &RoutesManifest, ctx: &SourceContext) -> Result<()> {
    let mut seen = HashSet::new();

    for entry in &manifest.expose_routes {
        validate_key(&entry.name, ctx)?;
        if !seen.insert(entry.name.as_str()) {
            return Err(ctx.validation_error(
                format!("registry key '{}' is exposed more than once", entry.name),
                &entry.name,
            ));
        }
        validate_internal_path(&entry.internal_path, ctx)?;
    }

    for group in &manifest.mount_routes {
        if group.name.trim().is_empty() {
            return Err(ctx.validation_error("mount group name must not be empty", ""));
        }
        for key in group.features.keys() {
            validate_key(key, ctx)?;
        }
    }

    Ok(())
}

fn validate_key(key: &str, ctx: &SourceContext) -> Result<()> {
    if key.trim().is_empty() {
        return Err(ctx.validation_error("registry key must not be empty", key));
    }
    if key.contains('/') {
        return Err(ctx.validation_error(
            format!("registry key '{}' must not contain '/'", key),
            key,
        ));
    }
    Ok(())
}

/// Both `/` and `\` count as separators, matching how the path is later
/// joined into specifiers and scan directories.
fn validate_internal_path(internal_path: &str, ctx: &SourceContext) -> Result<()> {
    let escapes = internal_path.starts_with(['/', '\\'])
        || internal_path.split(['/', '\\']).any(|s| s == "..")
        || Path::new(internal_path)
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ctx.validation_error(
            format!(
                "internal_path '{}' must be a relative path inside the package",
                internal_path
            ),
            internal_path,
        ));
    }
    Ok(())
}
