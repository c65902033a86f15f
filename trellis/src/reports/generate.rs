//! Generate command report data structures.

use std::path::PathBuf;

use trellis_codegen::pipeline::Diagnostic;

use super::{
    output::{Output, Report},
    plural, render_diagnostics,
};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Id of the host package.
    pub host: String,
    /// Number of registry keys.
    pub registry_count: usize,
    /// Number of resolved mounts.
    pub mount_count: usize,
    /// Diagnostics from the pipeline and the emitter.
    pub diagnostics: Vec<Diagnostic>,
    /// Generation result (files written or preview).
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_root: PathBuf,
    pub declarations: PathBuf,
    /// Stubs written, relative to the output root.
    pub stubs: Vec<String>,
    /// Whether a previous output tree was replaced.
    pub removed_previous: bool,
    /// Path of the registry snapshot, if one was written.
    pub snapshot: Option<PathBuf>,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(files) => self.render_preview(out, files),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        if let Some(snapshot) = &written.snapshot {
            out.key_value("Registry snapshot written to", &snapshot.display().to_string());
            out.newline();
        }

        render_diagnostics(out, &self.diagnostics, false);

        self.render_summary(out);
        out.newline();

        let verb = if written.removed_previous {
            "Regenerated"
        } else {
            "Generated"
        };
        out.key_value(verb, &written.output_root.display().to_string());
        if !written.stubs.is_empty() {
            out.section(&format!("Stubs ({})", written.stubs.len()));
            for stub in &written.stubs {
                out.added_item(stub);
            }
        }
        out.key_value("Declarations", &written.declarations.display().to_string());
    }

    fn render_preview(&self, out: &mut dyn Output, files: &[PreviewFile]) {
        for file in files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        self.render_summary(out);
        out.preformatted(&format!("{} would be generated", plural(files.len(), "file")));
    }

    fn render_summary(&self, out: &mut dyn Output) {
        out.key_value("Host", &self.host);
        out.key_value("Registry", &plural(self.registry_count, "key"));
        out.key_value("Mounts", &plural(self.mount_count, "mount"));
    }
}
