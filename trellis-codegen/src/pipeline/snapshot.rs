//! Registry snapshot plugin for debugging.
//!
//! Writes the registry as JSON once resolution has finished. Nothing reads
//! the snapshot back; it exists for humans inspecting a run.

use std::{
    fs,
    path::{Path, PathBuf},
};

use eyre::{Context, Result};

use super::{GenerationContext, Plugin};

/// Environment variable that enables the snapshot.
pub const DEBUG_ENV: &str = "TRELLIS_DEBUG";

/// File name of the snapshot inside the snapshot directory.
pub const SNAPSHOT_FILE: &str = "registry.json";

/// Whether `TRELLIS_DEBUG` asks for a snapshot.
pub fn debug_enabled() -> bool {
    std::env::var(DEBUG_ENV).is_ok_and(|v| is_truthy(&v))
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

/// A plugin that writes `registry.json` after the resolve phase.
///
/// # Example
///
/// ```ignore
/// let pipeline = Pipeline::new().plugin(SnapshotPlugin::new(host_dir.join(".trellis")));
/// let ctx = pipeline.run(workspace, host)?;
/// ```
pub struct SnapshotPlugin {
    output_dir: PathBuf,
}

impl SnapshotPlugin {
    /// Create a snapshot plugin writing into `output_dir`.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path the snapshot is written to.
    pub fn path(&self) -> PathBuf {
        self.output_dir.join(SNAPSHOT_FILE)
    }

    fn write(&self, dir: &Path, ctx: &GenerationContext) -> Result<()> {
        let json = ctx
            .registry
            .as_ref()
            .map(|r| r.to_json())
            .transpose()?
            .unwrap_or_else(|| "{}".to_string());

        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create '{}'", dir.display()))?;
        fs::write(self.path(), json)
            .wrap_err_with(|| format!("failed to write '{}'", self.path().display()))?;
        Ok(())
    }
}

impl Plugin for SnapshotPlugin {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut GenerationContext) -> Result<()> {
        if phase == "resolve" {
            self.write(&self.output_dir, ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use tempfile::TempDir;
    use trellis_manifest::{Package, Workspace, WorkspaceConfig};

    use super::*;
    use crate::pipeline::Pipeline;

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
        assert!(!is_truthy(""));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("FALSE"));
    }

    #[test]
    fn test_snapshot_written_after_resolve() {
        let temp = TempDir::new().unwrap();
        let workspace = Workspace::from_packages(
            temp.path(),
            WorkspaceConfig::default(),
            vec![Package {
                id: "web".to_string(),
                dir: PathBuf::from("/nowhere/web"),
                manifest: None,
            }],
        );
        let plugin = SnapshotPlugin::new(temp.path().join(".trellis"));
        let path = plugin.path();

        Pipeline::new().plugin(plugin).run(workspace, "web").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "{}");
    }
}
