//! Package identity and per-package manifest loading.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Error, Result, RoutesManifest};

/// File holding the package's declared name.
pub const PACKAGE_JSON: &str = "package.json";

/// A package taking part in route composition.
#[derive(Debug, Clone)]
pub struct Package {
    /// Declared package name, used as provider id and import prefix.
    pub id: String,
    /// Package root directory.
    pub dir: PathBuf,
    /// Parsed `routes.toml`, if the package has one.
    pub manifest: Option<RoutesManifest>,
}

impl Package {
    /// Load a package from its directory.
    ///
    /// Both `package.json` and `routes.toml` are read from disk.
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let id = match read_package_name(&dir)? {
            Some(name) => name,
            None => dir_name(&dir),
        };
        let manifest = RoutesManifest::load(&dir)?;
        Ok(Self { id, dir, manifest })
    }

    /// Manifest of this package, or an empty one.
    pub fn routes(&self) -> &RoutesManifest {
        static EMPTY: RoutesManifest = RoutesManifest {
            expose_routes: Vec::new(),
            mount_routes: Vec::new(),
        };
        self.manifest.as_ref().unwrap_or(&EMPTY)
    }
}

#[derive(Deserialize)]
struct PackageJson {
    name: Option<String>,
}

/// Read the `name` field of `package.json` in `dir`.
///
/// Returns `Ok(None)` when the file or the field is missing.
pub fn read_package_name(dir: &Path) -> Result<Option<String>> {
    let path = dir.join(PACKAGE_JSON);
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
    let package: PackageJson = serde_json::from_str(&content)
        .map_err(|source| Box::new(Error::PackageJson { path, source }))?;
    Ok(package.name.filter(|n| !n.trim().is_empty()))
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_name_from_package_json() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("billing");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(PACKAGE_JSON),
            r#"{ "name": "@acme/billing", "version": "1.0.0" }"#,
        )
        .unwrap();

        let package = Package::load(&dir).unwrap();

        assert_eq!(package.id, "@acme/billing");
        assert!(package.manifest.is_none());
        assert!(package.routes().is_empty());
    }

    #[test]
    fn test_name_falls_back_to_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("docs");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(PACKAGE_JSON), r#"{ "private": true }"#).unwrap();

        let package = Package::load(&dir).unwrap();

        assert_eq!(package.id, "docs");
    }

    #[test]
    fn test_malformed_package_json() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(PACKAGE_JSON), "{ name: ").unwrap();

        let err = read_package_name(temp.path()).unwrap_err();
        assert!(matches!(*err, Error::PackageJson { .. }));
    }
}
