//! Scan phase - builds the registry from exposed route groups.

use eyre::{Context, Result};
use trellis_core::{discover, join_segments};

use crate::{
    Registry, RegistryItem,
    pipeline::{Diagnostic, GenerationContext, Phase},
};

/// Phase that scans every package's `expose_routes` into the registry.
///
/// Packages are scanned in directory order; when two packages expose the
/// same key the later one wins and a warning is recorded. An expose whose
/// `internal_path` is not a directory is skipped with an info diagnostic.
pub struct ScanPhase;

impl Phase for ScanPhase {
    fn name(&self) -> &'static str {
        "scan"
    }

    fn description(&self) -> &'static str {
        "Build the route registry from exposed groups"
    }

    fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
        let mut registry = Registry::new();
        let mut diagnostics = Vec::new();

        for package in ctx.workspace.packages() {
            for entry in &package.routes().expose_routes {
                let location = format!("{} expose_routes.{}", package.id, entry.name);
                let internal_path = join_segments([entry.internal_path.as_str()]);
                let dir = package.dir.join(&internal_path);

                if !dir.is_dir() {
                    diagnostics.push(
                        Diagnostic::info(
                            self.name(),
                            format!(
                                "skipping '{}': '{}' is not a directory",
                                entry.name,
                                dir.display()
                            ),
                        )
                        .at(location),
                    );
                    continue;
                }

                let mut route_files = discover(&dir, &ctx.patterns).wrap_err_with(|| {
                    format!("failed to scan routes of '{}' in '{}'", entry.name, package.id)
                })?;
                route_files.sort();

                let item = RegistryItem {
                    provider_id: package.id.clone(),
                    internal_path,
                    route_files,
                    description: entry.description.clone(),
                };

                if let Some(previous) = registry.insert(entry.name.clone(), item) {
                    diagnostics.push(
                        Diagnostic::warning(
                            self.name(),
                            format!(
                                "registry key '{}' from '{}' replaces the one from '{}'",
                                entry.name, package.id, previous.provider_id
                            ),
                        )
                        .at(location),
                    );
                }
            }
        }

        ctx.diagnostics.extend(diagnostics);
        ctx.registry = Some(registry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use tempfile::TempDir;
    use trellis_manifest::{Package, RoutesManifest, Workspace, WorkspaceConfig};

    use super::*;
    use crate::pipeline::Severity;

    fn package(root: &Path, id: &str, routes: &str, files: &[&str]) -> Package {
        let dir = root.join(id);
        for file in files {
            let path = dir.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "export default function Page() {}").unwrap();
        }
        fs::create_dir_all(&dir).unwrap();
        Package {
            id: id.to_string(),
            dir,
            manifest: Some(routes.parse::<RoutesManifest>().unwrap()),
        }
    }

    fn scan(packages: Vec<Package>, root: &Path) -> GenerationContext {
        let workspace = Workspace::from_packages(root, WorkspaceConfig::default(), packages);
        let mut ctx = GenerationContext::new(workspace, "web");
        ScanPhase.run(&mut ctx).expect("scan should succeed");
        ctx
    }

    #[test]
    fn test_scan_builds_registry() {
        let temp = TempDir::new().unwrap();
        let billing = package(
            temp.path(),
            "billing",
            r#"
            [[expose_routes]]
            name = "billing"
            internal_path = "app"
            description = "Invoices"
            "#,
            &["app/page.tsx", "app/invoices/[id]/page.tsx", "app/ui/table.tsx"],
        );

        let ctx = scan(vec![billing], temp.path());
        let registry = ctx.registry.unwrap();
        let item = registry.get("billing").unwrap();

        assert_eq!(item.provider_id, "billing");
        assert_eq!(item.internal_path, "app");
        assert_eq!(item.route_files, vec!["invoices/[id]/page.tsx", "page.tsx"]);
        assert_eq!(item.description.as_deref(), Some("Invoices"));
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_scan_defaults_to_package_root() {
        let temp = TempDir::new().unwrap();
        let docs = package(
            temp.path(),
            "docs",
            r#"
            [[expose_routes]]
            name = "docs"
            "#,
            &["guide/page.mdx", "guide/page.js"],
        );

        let ctx = scan(vec![docs], temp.path());
        let registry = ctx.registry.unwrap();

        assert_eq!(registry.get("docs").unwrap().internal_path, "");
        assert_eq!(registry.get("docs").unwrap().route_files, vec!["guide/page.js"]);
    }

    #[test]
    fn test_missing_internal_path_is_skipped() {
        let temp = TempDir::new().unwrap();
        let docs = package(
            temp.path(),
            "docs",
            r#"
            [[expose_routes]]
            name = "docs"
            internal_path = "app"
            "#,
            &[],
        );

        let ctx = scan(vec![docs], temp.path());

        assert!(ctx.registry.unwrap().is_empty());
        assert_eq!(ctx.diagnostics.len(), 1);
        assert_eq!(ctx.diagnostics[0].severity, Severity::Info);
    }

    #[test]
    fn test_duplicate_key_last_wins_with_warning() {
        let temp = TempDir::new().unwrap();
        let routes = r#"
            [[expose_routes]]
            name = "shared"
        "#;
        let a = package(temp.path(), "a", routes, &["page.tsx"]);
        let b = package(temp.path(), "b", routes, &["layout.tsx"]);

        let ctx = scan(vec![b, a], temp.path());
        let registry = ctx.registry.unwrap();

        assert_eq!(registry.get("shared").unwrap().provider_id, "b");
        assert_eq!(ctx.diagnostics.len(), 1);
        assert!(ctx.diagnostics[0].severity.is_warning());
        assert!(ctx.diagnostics[0].message.contains("replaces the one from 'a'"));
    }
}
