//! Route file discovery.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};

/// Base names recognized as route files.
pub const ROUTE_NAMES: &[&str] = &[
    "page",
    "layout",
    "loading",
    "error",
    "head",
    "not-found",
    "template",
    "route",
];

/// Extensions recognized for route files.
pub const ROUTE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// The set of file names that count as route files.
///
/// A file matches when its stem is one of `names` and its extension is one
/// of `extensions`. Directories listed with [`RoutePatterns::exclude`] are
/// never entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePatterns {
    names: Vec<String>,
    extensions: Vec<String>,
    excluded: Vec<PathBuf>,
}

impl RoutePatterns {
    /// Create a pattern set from explicit names and extensions.
    pub fn new<N, E>(names: N, extensions: E) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            extensions: extensions.into_iter().map(Into::into).collect(),
            excluded: Vec::new(),
        }
    }

    /// Skip `dir` and everything below it during discovery.
    pub fn exclude(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded.push(dir.into());
        self
    }

    /// Whether `dir` is one of the excluded directories.
    pub fn is_excluded(&self, dir: &Path) -> bool {
        self.excluded.iter().any(|e| e == dir)
    }

    /// Whether a file name matches one of the recognized patterns.
    pub fn matches(&self, file_name: &str) -> bool {
        let Some((stem, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        self.names.iter().any(|n| n == stem) && self.extensions.iter().any(|e| e == ext)
    }

    /// Recognized extensions.
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }
}

impl Default for RoutePatterns {
    fn default() -> Self {
        Self::new(ROUTE_NAMES.iter().copied(), ROUTE_EXTENSIONS.iter().copied())
    }
}

/// Find every route file under `root`.
///
/// Returns paths relative to `root` with `/` separators, in no particular
/// order. A missing `root` yields an empty list. `node_modules`,
/// dot-directories and excluded directories are skipped.
pub fn discover(root: &Path, patterns: &RoutePatterns) -> Result<Vec<String>> {
    let mut found = Vec::new();
    if root.is_dir() && !patterns.is_excluded(root) {
        scan(root, "", patterns, &mut found)?;
    }
    Ok(found)
}

fn scan(dir: &Path, prefix: &str, patterns: &RoutePatterns, found: &mut Vec<String>) -> Result<()> {
    let entries =
        std::fs::read_dir(dir).wrap_err_with(|| format!("failed to read '{}'", dir.display()))?;

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();

        let relative = if prefix.is_empty() {
            file_name.clone()
        } else {
            format!("{}/{}", prefix, file_name)
        };

        if path.is_dir() {
            if file_name.starts_with('.')
                || file_name == "node_modules"
                || patterns.is_excluded(&path)
            {
                continue;
            }
            scan(&path, &relative, patterns, found)?;
        } else if patterns.matches(&file_name) {
            found.push(relative);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export default function X() {}").unwrap();
    }

    #[test]
    fn test_patterns_match() {
        let patterns = RoutePatterns::default();
        assert!(patterns.matches("page.tsx"));
        assert!(patterns.matches("not-found.js"));
        assert!(patterns.matches("route.ts"));
        assert!(!patterns.matches("page.css"));
        assert!(!patterns.matches("button.tsx"));
        assert!(!patterns.matches("page"));
    }

    #[test]
    fn test_discover_nested_routes() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "page.tsx");
        touch(temp.path(), "invoices/[id]/page.jsx");
        touch(temp.path(), "invoices/layout.ts");
        touch(temp.path(), "invoices/components/table.tsx");

        let mut files = discover(temp.path(), &RoutePatterns::default()).unwrap();
        files.sort();

        assert_eq!(
            files,
            vec!["invoices/[id]/page.jsx", "invoices/layout.ts", "page.tsx"]
        );
    }

    #[test]
    fn test_discover_skips_node_modules_and_hidden() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "node_modules/pkg/page.js");
        touch(temp.path(), ".next/server/page.js");
        touch(temp.path(), "about/page.tsx");

        let files = discover(temp.path(), &RoutePatterns::default()).unwrap();

        assert_eq!(files, vec!["about/page.tsx"]);
    }

    #[test]
    fn test_discover_skips_excluded_dirs() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "page.tsx");
        touch(temp.path(), "(mounted)/billing/page.tsx");
        touch(temp.path(), "settings/page.tsx");

        let patterns = RoutePatterns::default().exclude(temp.path().join("(mounted)"));
        let mut files = discover(temp.path(), &patterns).unwrap();
        files.sort();

        assert_eq!(files, vec!["page.tsx", "settings/page.tsx"]);

        let patterns = RoutePatterns::default().exclude(temp.path());
        assert!(discover(temp.path(), &patterns).unwrap().is_empty());
    }

    #[test]
    fn test_discover_missing_root_is_empty() {
        let temp = TempDir::new().unwrap();
        let files = discover(&temp.path().join("missing"), &RoutePatterns::default()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_discover_custom_patterns() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "page.mdx");
        touch(temp.path(), "page.tsx");

        let patterns = RoutePatterns::new(["page"], ["mdx"]);
        let files = discover(temp.path(), &patterns).unwrap();

        assert_eq!(files, vec!["page.mdx"]);
    }
}
