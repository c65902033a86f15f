//! Check command report data structures.

use std::path::PathBuf;

use trellis_codegen::pipeline::Diagnostic;

use super::{
    output::{Output, Report},
    plural, render_diagnostics,
};

/// Report data from workspace validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Workspace root.
    pub root: PathBuf,
    pub host: String,
    pub package_count: usize,
    pub registry_count: usize,
    pub mount_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// Whether the check passed (no errors).
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        render_diagnostics(out, &self.diagnostics, true);

        if !self.diagnostics.is_empty() {
            out.newline();
        }

        if !self.is_valid() {
            return;
        }

        out.preformatted(&format!("✓ {} is valid", self.root.display()));
        out.newline();
        out.key_value("Host", &self.host);
        out.key_value("Packages", &self.package_count.to_string());
        out.key_value("Registry", &plural(self.registry_count, "key"));
        out.key_value("Mounts", &plural(self.mount_count, "mount"));
    }
}
