//! List operation - registry keys and resolved mounts.

use eyre::Result;
use trellis_codegen::pipeline::{Pipeline, Severity};

use super::Session;
use crate::reports::{ListReport, MountLine, MountPointLine, RegistryLine};

/// Execute the list operation.
pub fn list(session: Session) -> Result<ListReport> {
    let host = session.host_id.clone();
    let mut ctx = session.run(Pipeline::new())?;

    let registry = ctx
        .take_registry()
        .iter()
        .map(|(key, item)| RegistryLine {
            key: key.to_string(),
            provider: item.provider_id.clone(),
            internal_path: item.internal_path.clone(),
            route_count: item.route_files.len(),
            description: item.description.clone(),
        })
        .collect();

    let mounts = ctx
        .take_mounts()
        .into_iter()
        .map(|mount| MountLine {
            prefix: format!("/{}", mount.prefix()),
            key: mount.key,
            provider: mount.provider_id,
            route_count: mount.route_files.len(),
        })
        .collect();

    let mount_points = ctx
        .take_index()
        .iter()
        .map(|(package, prefixes)| MountPointLine {
            package: package.to_string(),
            prefixes: prefixes.iter().map(|p| format!("/{}", p)).collect(),
        })
        .collect();

    let diagnostics = ctx
        .diagnostics
        .into_iter()
        .filter(|d| !matches!(d.severity, Severity::Info))
        .collect();

    Ok(ListReport {
        host,
        registry,
        mounts,
        mount_points,
        diagnostics,
    })
}
