//! Generation context passed through pipeline phases.

use trellis_core::RoutePatterns;
use trellis_manifest::{Package, Workspace};

use super::diagnostic::{Diagnostic, Severity};
use crate::{PackageMountIndex, Registry, ResolvedMount};

/// Context passed through all pipeline phases.
///
/// Carries the state of one generation run, accumulating results and
/// diagnostics along the way. Nothing in it outlives the run.
#[derive(Debug)]
pub struct GenerationContext {
    /// The freshly loaded workspace.
    pub workspace: Workspace,
    /// Id of the host package.
    pub host_id: String,
    /// Route file patterns used by the scan.
    pub patterns: RoutePatterns,
    /// The registry (populated by ScanPhase).
    pub registry: Option<Registry>,
    /// Resolved mounts (populated by ResolvePhase).
    pub mounts: Option<Vec<ResolvedMount>>,
    /// Final mount-prefix index (populated by ResolvePhase).
    pub index: Option<PackageMountIndex>,
    /// Diagnostics collected during the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationContext {
    /// Create a new context for a workspace and host.
    pub fn new(workspace: Workspace, host_id: impl Into<String>) -> Self {
        Self {
            workspace,
            host_id: host_id.into(),
            patterns: RoutePatterns::default(),
            registry: None,
            mounts: None,
            index: None,
            diagnostics: Vec::new(),
        }
    }

    /// The host package, if it is part of the workspace.
    pub fn host(&self) -> Option<&Package> {
        self.workspace.package(&self.host_id)
    }

    /// Packages in resolution order: host first, then by directory path.
    pub fn ordered_packages(&self) -> Vec<&Package> {
        let mut rest: Vec<&Package> = self
            .workspace
            .packages()
            .iter()
            .filter(|p| p.id != self.host_id)
            .collect();
        rest.sort_by(|a, b| a.dir.cmp(&b.dir));

        self.host().into_iter().chain(rest).collect()
    }

    /// Check if any error diagnostics have been recorded.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    /// Check if any warning diagnostics have been recorded.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    /// Get all warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    /// Take the registry out of the context.
    pub fn take_registry(&mut self) -> Registry {
        self.registry.take().unwrap_or_default()
    }

    /// Take the resolved mounts out of the context.
    pub fn take_mounts(&mut self) -> Vec<ResolvedMount> {
        self.mounts.take().unwrap_or_default()
    }

    /// Take the final mount-prefix index out of the context.
    pub fn take_index(&mut self) -> PackageMountIndex {
        self.index.take().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use trellis_manifest::WorkspaceConfig;

    use super::*;

    fn package(id: &str, dir: &str) -> Package {
        Package {
            id: id.to_string(),
            dir: PathBuf::from(dir),
            manifest: None,
        }
    }

    fn context(host: &str) -> GenerationContext {
        let workspace = Workspace::from_packages(
            "/ws",
            WorkspaceConfig::default(),
            vec![
                package("web", "/ws/packages/web"),
                package("billing", "/ws/packages/billing"),
                package("admin", "/ws/packages/admin"),
            ],
        );
        GenerationContext::new(workspace, host)
    }

    #[test]
    fn test_host_is_ordered_first() {
        let ctx = context("web");
        let order: Vec<_> = ctx.ordered_packages().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["web", "admin", "billing"]);
    }

    #[test]
    fn test_unknown_host_orders_by_path() {
        let ctx = context("missing");
        let order: Vec<_> = ctx.ordered_packages().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, vec!["admin", "billing", "web"]);
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = context("web");
        assert!(!ctx.has_warnings());

        ctx.diagnostics.push(Diagnostic::warning("resolve", "unknown key"));
        ctx.diagnostics.push(Diagnostic::info("scan", "skipped"));

        assert!(ctx.has_warnings());
        assert!(!ctx.has_errors());
        assert_eq!(ctx.warnings().count(), 1);
    }
}
