//! Core operations.
//!
//! This module contains the business logic for trellis commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod clean;
pub mod generate;
pub mod list;

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use trellis_codegen::{
    language::OutputTargets,
    pipeline::{GenerationContext, Pipeline},
};
use trellis_manifest::Workspace;

pub use check::check;
pub use clean::clean;
pub use generate::generate;
pub use list::list;

/// Directory below the host where debug snapshots are written.
pub const SNAPSHOT_DIR: &str = ".trellis";

/// A loaded workspace with its host and output locations decided.
#[derive(Debug)]
pub struct Session {
    pub workspace: Workspace,
    pub host_id: String,
    pub targets: OutputTargets,
    pub snapshot_dir: PathBuf,
}

impl Session {
    /// Load the workspace at `root` and select the host.
    ///
    /// `host` and `output` override the workspace configuration.
    pub fn open(
        root: &Path,
        host: Option<&str>,
        output: Option<&str>,
    ) -> trellis_manifest::Result<Self> {
        let workspace = Workspace::load(root)?;
        let host = workspace.host(host)?;
        let targets = OutputTargets::for_host(&host.dir, workspace.config(), output);
        let snapshot_dir = host.dir.join(SNAPSHOT_DIR);
        let host_id = host.id.clone();

        Ok(Self {
            workspace,
            host_id,
            targets,
            snapshot_dir,
        })
    }

    /// Run `pipeline` over the workspace.
    ///
    /// The output root and snapshot directory are excluded from the scan so
    /// a previous run's stubs are never registered as route files.
    pub fn run(self, pipeline: Pipeline) -> Result<GenerationContext> {
        pipeline
            .exclude(self.targets.output_root)
            .exclude(self.snapshot_dir)
            .run(self.workspace, self.host_id)
            .wrap_err("Pipeline failed")
    }
}

#[cfg(test)]
mod tests {
    use trellis_codegen::testing::WorkspaceFixture;

    use super::*;

    #[test]
    fn test_open_uses_first_package_as_host() {
        let ws = WorkspaceFixture::new().unwrap();
        ws.package("admin", "").unwrap();
        ws.package("web", "").unwrap();

        let session = Session::open(ws.root(), None, None).unwrap();

        assert_eq!(session.host_id, "admin");
        assert_eq!(
            session.targets.output_root,
            ws.package_dir("admin").join("app/(mounted)")
        );
        assert_eq!(session.snapshot_dir, ws.package_dir("admin").join(".trellis"));
    }

    #[test]
    fn test_open_host_precedence() {
        let ws = WorkspaceFixture::new().unwrap();
        ws.config("host = \"web\"\noutput = \"app/(shared)\"\n").unwrap();
        ws.package("admin", "").unwrap();
        ws.package("web", "").unwrap();

        let configured = Session::open(ws.root(), None, None).unwrap();
        assert_eq!(configured.host_id, "web");
        assert_eq!(
            configured.targets.output_root,
            ws.package_dir("web").join("app/(shared)")
        );

        let explicit = Session::open(ws.root(), Some("admin"), Some("routes")).unwrap();
        assert_eq!(explicit.host_id, "admin");
        assert_eq!(explicit.targets.output_root, ws.package_dir("admin").join("routes"));
    }

    #[test]
    fn test_open_unknown_host_fails() {
        let ws = WorkspaceFixture::new().unwrap();
        ws.package("web", "").unwrap();

        assert!(Session::open(ws.root(), Some("nope"), None).is_err());
    }
}
