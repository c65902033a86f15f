//! Emitter abstractions.

use std::path::{Path, PathBuf};

use eyre::Result;
use trellis_manifest::WorkspaceConfig;

use crate::pipeline::Diagnostic;

/// Trait for emitters that turn a resolved run into files.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "typescript")
    fn language(&self) -> &'static str;

    /// Render every file the emitter would write, without touching disk.
    fn preview(&self, targets: &OutputTargets) -> Vec<PreviewFile>;

    /// Replace the generated output with a fresh emission.
    fn generate(&self, targets: &OutputTargets) -> Result<GenerateResult>;

    /// Remove everything a previous emission wrote.
    ///
    /// Default implementation removes nothing.
    fn clean(&self, _targets: &OutputTargets) -> Result<CleanResult> {
        Ok(CleanResult::default())
    }
}

/// Where an emission writes its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTargets {
    /// Directory owned by the run; wiped before stubs are written.
    pub output_root: PathBuf,
    /// Path of the declaration file.
    pub declarations: PathBuf,
}

impl OutputTargets {
    pub fn new(output_root: impl Into<PathBuf>, declarations: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            declarations: declarations.into(),
        }
    }

    /// Targets relative to the host directory.
    ///
    /// `output` overrides the configured output directory.
    pub fn for_host(host_dir: &Path, config: &WorkspaceConfig, output: Option<&str>) -> Self {
        let output = output.unwrap_or_else(|| config.output_dir());
        Self::new(host_dir.join(output), host_dir.join(config.declarations_file()))
    }
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Stub files written, relative to the output root
    pub stubs: Vec<String>,
    /// Whether a previous output root was removed first
    pub removed_previous: bool,
    /// Declaration file that was written
    pub declarations: Option<PathBuf>,
    /// Non-fatal findings of the emission
    pub diagnostics: Vec<Diagnostic>,
}

/// Result of cleaning generated files
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Files and directories that were removed
    pub removed: Vec<PathBuf>,
}

impl CleanResult {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

/// A generated file for preview
#[derive(Debug)]
pub struct PreviewFile {
    /// Destination path
    pub path: PathBuf,
    /// File content
    pub content: String,
}
