//! Clean command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from removing generated files.
#[derive(Debug)]
pub struct CleanReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Removed (or removable, in a dry run) files and directories.
    pub removed: Vec<PathBuf>,
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        if self.removed.is_empty() {
            out.preformatted("No generated files found.");
            return;
        }

        if self.dry_run {
            out.section("Would delete");
        } else {
            out.section("Deleted");
        }
        for path in &self.removed {
            out.removed_item(&path.display().to_string());
        }
    }
}
