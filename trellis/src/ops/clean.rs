//! Clean operation - remove generated output.

use eyre::{Context, Result};

use super::Session;
use crate::reports::CleanReport;

/// Execute the clean operation.
///
/// Removes the output root and the declaration file. A dry run only lists
/// the targets that exist.
pub fn clean(session: &Session, dry_run: bool) -> Result<CleanReport> {
    let targets = &session.targets;

    let removed = if dry_run {
        [&targets.output_root, &targets.declarations]
            .into_iter()
            .filter(|path| path.exists())
            .cloned()
            .collect()
    } else {
        trellis_codegen_typescript::clean(targets)
            .wrap_err("Failed to remove generated files")?
            .removed
    };

    Ok(CleanReport { dry_run, removed })
}

#[cfg(test)]
mod tests {
    use trellis_codegen::testing::WorkspaceFixture;

    use super::*;

    #[test]
    fn test_clean_removes_generated_files() {
        let ws = WorkspaceFixture::new().unwrap();
        ws.package("web", "").unwrap();
        ws.write("packages/web/app/(mounted)/docs/page.tsx", "export {};")
            .unwrap();
        ws.write("packages/web/mounted-routes.d.ts", "").unwrap();
        let session = Session::open(ws.root(), None, None).unwrap();

        let preview = clean(&session, true).unwrap();
        assert_eq!(preview.removed.len(), 2);
        assert!(session.targets.output_root.exists());

        let report = clean(&session, false).unwrap();
        assert_eq!(report.removed.len(), 2);
        assert!(!session.targets.output_root.exists());
        assert!(!session.targets.declarations.exists());

        assert!(clean(&session, false).unwrap().removed.is_empty());
    }
}
