//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod clean;
mod generate;
mod list;
mod output;

use trellis_codegen::pipeline::{Diagnostic, Severity};

pub use check::CheckReport;
pub use clean::CleanReport;
pub use generate::{GenerateReport, GenerationResult, PreviewFile, WrittenResult};
pub use list::{ListReport, MountLine, MountPointLine, RegistryLine};
pub use output::{Output, Report, TerminalOutput};

/// Render diagnostics by severity. Info diagnostics are skipped unless
/// `verbose` is set.
fn render_diagnostics(out: &mut dyn Output, diagnostics: &[Diagnostic], verbose: bool) {
    for diag in diagnostics {
        let msg = match &diag.location {
            Some(loc) => format!("{}\n  --> {}", diag.message, loc),
            None => diag.message.clone(),
        };

        match diag.severity {
            Severity::Error => out.error(&msg),
            Severity::Warning => out.warning(&msg),
            Severity::Info if verbose => out.info(&msg),
            Severity::Info => {}
        }
    }
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}
