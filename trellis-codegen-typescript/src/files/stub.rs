//! Re-export stub files placed in the host output tree.

use std::path::{Path, PathBuf};

use trellis_codegen::{ResolvedMount, builder::CodeBuilder};
use trellis_core::GeneratedFile;

use crate::ast::Export;

/// A stub that re-exports one provider route file.
///
/// The rendered content is exactly two lines: a default re-export and a
/// namespace re-export of the same specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubFile {
    /// Registry key the stub was resolved from.
    pub key: String,
    /// Path relative to the output root, forward-slash separated.
    pub output_path: String,
    /// Import specifier of the original route file.
    pub specifier: String,
}

impl StubFile {
    pub fn new(
        key: impl Into<String>,
        output_path: impl Into<String>,
        specifier: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            output_path: output_path.into(),
            specifier: specifier.into(),
        }
    }

    /// One stub per route file of a resolved mount.
    pub fn for_mount(mount: &ResolvedMount) -> impl Iterator<Item = StubFile> + '_ {
        mount.route_files.iter().map(|file| {
            StubFile::new(
                mount.key.clone(),
                mount.output_path(file),
                mount.import_specifier(file),
            )
        })
    }
}

impl GeneratedFile for StubFile {
    fn path(&self, base: &Path) -> PathBuf {
        self.output_path
            .split('/')
            .fold(base.to_path_buf(), |path, segment| path.join(segment))
    }

    fn render(&self) -> String {
        let builder = Export::new()
            .from(&self.specifier)
            .named("default")
            .render(CodeBuilder::typescript());
        Export::new().from(&self.specifier).render(builder).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let stub = StubFile::new("billing", "billing/page.tsx", "billing/app/page");
        insta::assert_snapshot!(stub.render(), @r"
        export { default } from 'billing/app/page';
        export * from 'billing/app/page';
        ");
    }

    #[test]
    fn test_path_below_base() {
        let stub = StubFile::new("billing", "shop/billing/[id]/page.tsx", "billing/app/[id]/page");
        assert_eq!(
            stub.path(Path::new("/host/app/(mounted)")),
            PathBuf::from("/host/app/(mounted)/shop/billing/[id]/page.tsx")
        );
    }

    #[test]
    fn test_for_mount() {
        let mount = ResolvedMount {
            key: "billing".to_string(),
            provider_id: "@acme/billing".to_string(),
            internal_path: "app".to_string(),
            route_files: vec!["page.tsx".to_string(), "invoices/layout.jsx".to_string()],
            mount_prefix: vec!["shop".to_string(), "billing".to_string()],
        };

        let stubs: Vec<_> = StubFile::for_mount(&mount).collect();

        assert_eq!(
            stubs,
            vec![
                StubFile::new("billing", "shop/billing/page.tsx", "@acme/billing/app/page"),
                StubFile::new(
                    "billing",
                    "shop/billing/invoices/layout.jsx",
                    "@acme/billing/app/invoices/layout"
                ),
            ]
        );
    }
}
