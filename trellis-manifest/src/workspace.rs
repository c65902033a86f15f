//! Workspace discovery: expands `members` into packages.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{Error, Package, Result, WorkspaceConfig};

/// All packages of one workspace, freshly loaded from disk.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: WorkspaceConfig,
    packages: Vec<Package>,
}

impl Workspace {
    /// Load the workspace rooted at `root`.
    ///
    /// Reads `trellis.toml`, expands its members and loads every package's
    /// `package.json` and `routes.toml`. Packages are ordered by directory
    /// path.
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let config = WorkspaceConfig::load(&root)?;
        let dirs = expand_members(&root, &config.members)?;

        let mut packages = Vec::with_capacity(dirs.len());
        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        for dir in dirs {
            let package = Package::load(dir)?;
            if let Some(first) = seen.get(&package.id) {
                return Err(Box::new(Error::DuplicatePackage {
                    name: package.id.clone(),
                    first: first.display().to_string(),
                    second: package.dir.display().to_string(),
                }));
            }
            seen.insert(package.id.clone(), package.dir.clone());
            packages.push(package);
        }

        if packages.is_empty() {
            return Err(Box::new(Error::EmptyWorkspace));
        }

        Ok(Self {
            root,
            config,
            packages,
        })
    }

    /// Build a workspace from already-loaded packages.
    pub fn from_packages(
        root: impl Into<PathBuf>,
        config: WorkspaceConfig,
        mut packages: Vec<Package>,
    ) -> Self {
        packages.sort_by(|a, b| a.dir.cmp(&b.dir));
        Self {
            root: root.into(),
            config,
            packages,
        }
    }

    /// Workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Workspace configuration.
    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Packages in directory order.
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Find a package by id.
    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    /// Select the host package.
    ///
    /// An explicit name (CLI flag or environment) wins over `host` in
    /// `trellis.toml`; without either the first package is the host.
    pub fn host(&self, explicit: Option<&str>) -> Result<&Package> {
        let name = explicit.or(self.config.host.as_deref());
        match name {
            Some(name) => self.package(name).ok_or_else(|| {
                Box::new(Error::UnknownHost {
                    name: name.to_string(),
                    known: self
                        .packages
                        .iter()
                        .map(|p| p.id.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
            }),
            None => self
                .packages
                .first()
                .ok_or_else(|| Box::new(Error::EmptyWorkspace)),
        }
    }
}

/// Expand member patterns into sorted, de-duplicated package directories.
fn expand_members(root: &Path, members: &[String]) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for member in members {
        if let Some(parent) = member.strip_suffix("/*") {
            let parent_dir = root.join(parent);
            if !parent_dir.is_dir() {
                continue;
            }
            let entries = std::fs::read_dir(&parent_dir).map_err(|e| Error::io(&parent_dir, e))?;
            for entry in entries {
                let entry = entry.map_err(|e| Error::io(&parent_dir, e))?;
                let path = entry.path();
                let hidden = entry.file_name().to_string_lossy().starts_with('.');
                if path.is_dir() && !hidden {
                    dirs.push(path);
                }
            }
        } else {
            let dir = root.join(member);
            if !dir.is_dir() {
                return Err(Box::new(Error::MissingMember {
                    member: member.clone(),
                }));
            }
            dirs.push(dir);
        }
    }

    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}
