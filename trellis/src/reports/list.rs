//! List command report data structures.

use trellis_codegen::pipeline::Diagnostic;

use super::{
    output::{Output, Report},
    render_diagnostics,
};

/// Registry keys and resolved mounts of a workspace.
#[derive(Debug)]
pub struct ListReport {
    pub host: String,
    pub registry: Vec<RegistryLine>,
    pub mounts: Vec<MountLine>,
    /// Every prefix each package ended up mounted at.
    pub mount_points: Vec<MountPointLine>,
    /// Warnings and errors from resolution.
    pub diagnostics: Vec<Diagnostic>,
}

/// One registry entry.
#[derive(Debug)]
pub struct RegistryLine {
    pub key: String,
    pub provider: String,
    pub internal_path: String,
    pub route_count: usize,
    pub description: Option<String>,
}

/// One resolved mount.
#[derive(Debug)]
pub struct MountLine {
    /// Prefix below the output root, with a leading `/`.
    pub prefix: String,
    pub key: String,
    pub provider: String,
    pub route_count: usize,
}

/// Where one package is mounted, in resolution order.
#[derive(Debug)]
pub struct MountPointLine {
    pub package: String,
    /// Prefixes with a leading `/`.
    pub prefixes: Vec<String>,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics, false);

        if self.registry.is_empty() {
            out.preformatted("No routes exposed");
        } else {
            out.section("Registry");
            for line in &self.registry {
                let location = if line.internal_path.is_empty() {
                    line.provider.clone()
                } else {
                    format!("{}/{}", line.provider, line.internal_path)
                };
                let mut text = format!("{} ({}, {} files)", line.key, location, line.route_count);
                if let Some(description) = &line.description {
                    text.push_str(&format!(" - {}", description));
                }
                out.list_item(&text);
            }
        }

        out.newline();
        if self.mounts.is_empty() {
            out.preformatted(&format!("Nothing mounted in {}", self.host));
        } else {
            out.section(&format!("Mounts in {}", self.host));
            for mount in &self.mounts {
                out.list_item(&format!(
                    "{} <- {} ({}, {} files)",
                    mount.prefix, mount.key, mount.provider, mount.route_count
                ));
            }
        }

        if !self.mount_points.is_empty() {
            out.newline();
            out.section("Mount points");
            for point in &self.mount_points {
                out.list_item(&format!("{}: {}", point.package, point.prefixes.join(", ")));
            }
        }
    }
}
