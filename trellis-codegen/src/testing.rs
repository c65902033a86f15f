//! Test utilities for building workspaces on disk.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};
use tempfile::TempDir;
use trellis_manifest::{CONFIG_FILE, PACKAGE_JSON, ROUTES_FILE, Workspace};

/// Content written for route files that are not given explicit content.
pub const ROUTE_COMPONENT: &str = "export default function Route() {\n  return null;\n}\n";

/// A throwaway workspace rooted in a temporary directory.
///
/// Packages live under `packages/`, matching the default `members`.
///
/// # Example
///
/// ```ignore
/// let ws = WorkspaceFixture::new()?;
/// ws.package("billing", r#"[[expose_routes]]
/// name = "billing"
/// internal_path = "app""#)?;
/// ws.route("billing", "app/invoices/page.tsx")?;
/// let workspace = ws.load()?;
/// ```
pub struct WorkspaceFixture {
    dir: TempDir,
}

impl WorkspaceFixture {
    /// Create an empty workspace.
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: TempDir::new().wrap_err("failed to create temporary workspace")?,
        })
    }

    /// The workspace root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Directory of a package.
    pub fn package_dir(&self, name: &str) -> PathBuf {
        self.root().join("packages").join(name)
    }

    /// Write a file relative to the workspace root, creating parents.
    pub fn write(&self, relative: impl AsRef<Path>, content: &str) -> Result<PathBuf> {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
        }
        fs::write(&path, content)
            .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
        Ok(path)
    }

    /// Write the workspace `trellis.toml`.
    pub fn config(&self, content: &str) -> Result<PathBuf> {
        self.write(CONFIG_FILE, content)
    }

    /// Create a package with a `package.json` named `name`.
    ///
    /// `routes` becomes the package's `routes.toml`; an empty string leaves
    /// the package without one.
    pub fn package(&self, name: &str, routes: &str) -> Result<PathBuf> {
        let dir = self.package_dir(name);
        self.write(
            dir.join(PACKAGE_JSON),
            &format!("{{\n  \"name\": \"{}\",\n  \"private\": true\n}}\n", name),
        )?;
        if !routes.is_empty() {
            self.write(dir.join(ROUTES_FILE), routes)?;
        }
        Ok(dir)
    }

    /// Replace a package's `routes.toml`.
    pub fn routes(&self, package: &str, routes: &str) -> Result<PathBuf> {
        self.write(self.package_dir(package).join(ROUTES_FILE), routes)
    }

    /// Write a route file with a placeholder component.
    pub fn route(&self, package: &str, file: &str) -> Result<PathBuf> {
        self.write(self.package_dir(package).join(file), ROUTE_COMPONENT)
    }

    /// Load the workspace the way a run would.
    pub fn load(&self) -> Result<Workspace> {
        Ok(Workspace::load(self.root())?)
    }

    /// Read a file relative to the workspace root.
    pub fn read(&self, relative: impl AsRef<Path>) -> Result<String> {
        let path = self.root().join(relative);
        fs::read_to_string(&path).wrap_err_with(|| format!("failed to read '{}'", path.display()))
    }

    /// All files below `relative`, as sorted forward-slash paths.
    pub fn files(&self, relative: impl AsRef<Path>) -> Result<Vec<String>> {
        let base = self.root().join(relative);
        let mut files = Vec::new();
        if base.is_dir() {
            collect_files(&base, &base, &mut files)?;
        }
        files.sort();
        Ok(files)
    }
}

fn collect_files(base: &Path, dir: &Path, files: &mut Vec<String>) -> Result<()> {
    let entries =
        fs::read_dir(dir).wrap_err_with(|| format!("failed to read '{}'", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(base, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(base) {
            files.push(trellis_core::to_forward_slash(relative));
        }
    }
    Ok(())
}
