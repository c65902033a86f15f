//! Check operation - resolve without writing.

use eyre::Result;
use trellis_codegen::pipeline::Pipeline;

use super::Session;
use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Runs the pipeline and returns its diagnostics. Nothing is written.
pub fn check(session: Session) -> Result<CheckReport> {
    let root = session.workspace.root().to_path_buf();
    let host = session.host_id.clone();
    let package_count = session.workspace.packages().len();

    let ctx = session.run(Pipeline::new())?;

    Ok(CheckReport {
        root,
        host,
        package_count,
        registry_count: ctx.registry.as_ref().map_or(0, |r| r.len()),
        mount_count: ctx.mounts.as_ref().map_or(0, Vec::len),
        diagnostics: ctx.diagnostics,
    })
}
