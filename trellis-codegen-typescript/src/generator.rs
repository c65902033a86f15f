//! Stub and declaration emitter.

use std::collections::BTreeMap;

use eyre::{Context, Result};
use trellis_codegen::{
    Registry, ResolvedMount,
    language::{CleanResult, GenerateResult, LanguageCodegen, OutputTargets, PreviewFile},
    pipeline::{Diagnostic, GenerationContext},
};
use trellis_core::{File, GeneratedFile, remove_dir_if_exists};

use crate::files::{DeclarationFile, StubFile};

const PHASE: &str = "emit";

/// Emits re-export stubs for resolved mounts and the declaration file for
/// the registry.
#[derive(Debug, Clone)]
pub struct Generator {
    registry: Registry,
    mounts: Vec<ResolvedMount>,
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "typescript"
    }

    fn preview(&self, targets: &OutputTargets) -> Vec<PreviewFile> {
        let (stubs, _) = self.stubs();
        let mut files: Vec<PreviewFile> = stubs
            .values()
            .map(|stub| PreviewFile {
                path: stub.path(&targets.output_root),
                content: stub.render(),
            })
            .collect();

        files.push(PreviewFile {
            path: targets.declarations.clone(),
            content: self.declarations(),
        });

        files
    }

    fn generate(&self, targets: &OutputTargets) -> Result<GenerateResult> {
        let (stubs, diagnostics) = self.stubs();

        let removed_previous = remove_dir_if_exists(&targets.output_root)
            .wrap_err("failed to clear the previous output")?;

        for stub in stubs.values() {
            stub.write(&targets.output_root)?;
        }

        File::new(&targets.declarations, self.declarations()).write()?;

        Ok(GenerateResult {
            stubs: stubs.into_keys().collect(),
            removed_previous,
            declarations: Some(targets.declarations.clone()),
            diagnostics,
        })
    }

    fn clean(&self, targets: &OutputTargets) -> Result<CleanResult> {
        clean(targets)
    }
}

impl Generator {
    pub fn new(registry: Registry, mounts: Vec<ResolvedMount>) -> Self {
        Self { registry, mounts }
    }

    /// Take the registry and resolved mounts out of a finished run.
    pub fn from_context(ctx: &mut GenerationContext) -> Self {
        Self::new(ctx.take_registry(), ctx.take_mounts())
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn mounts(&self) -> &[ResolvedMount] {
        &self.mounts
    }

    /// Rendered declaration file content.
    pub fn declarations(&self) -> String {
        DeclarationFile::new(&self.registry).render()
    }

    /// Stubs keyed by output path.
    ///
    /// When two mounts produce the same output path the later one wins and
    /// a warning is returned.
    fn stubs(&self) -> (BTreeMap<String, StubFile>, Vec<Diagnostic>) {
        let mut stubs = BTreeMap::new();
        let mut diagnostics = Vec::new();

        for stub in self.mounts.iter().flat_map(StubFile::for_mount) {
            let location = stub.output_path.clone();
            let key = stub.key.clone();
            if let Some(previous) = stubs.insert(stub.output_path.clone(), stub) {
                diagnostics.push(
                    Diagnostic::warning(
                        PHASE,
                        format!(
                            "'{}' from '{}' overwrites the stub from '{}'",
                            location, key, previous.key
                        ),
                    )
                    .at(location),
                );
            }
        }

        (stubs, diagnostics)
    }
}

/// Remove the output root and the declaration file.
///
/// Missing targets are skipped.
pub fn clean(targets: &OutputTargets) -> Result<CleanResult> {
    let mut result = CleanResult::default();

    if remove_dir_if_exists(&targets.output_root)? {
        result.removed.push(targets.output_root.clone());
    }

    if targets.declarations.is_file() {
        std::fs::remove_file(&targets.declarations).wrap_err_with(|| {
            format!("failed to remove '{}'", targets.declarations.display())
        })?;
        result.removed.push(targets.declarations.clone());
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use trellis_codegen::{RegistryItem, pipeline::Severity};

    use super::*;

    fn mount(key: &str, provider: &str, files: &[&str], prefix: &[&str]) -> ResolvedMount {
        ResolvedMount {
            key: key.to_string(),
            provider_id: provider.to_string(),
            internal_path: "app".to_string(),
            route_files: files.iter().map(|f| f.to_string()).collect(),
            mount_prefix: prefix.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn targets(temp: &TempDir) -> OutputTargets {
        OutputTargets::new(
            temp.path().join("app/(mounted)"),
            temp.path().join("mounted-routes.d.ts"),
        )
    }

    #[test]
    fn test_duplicate_output_path_later_wins() {
        let generator = Generator::new(
            Registry::new(),
            vec![
                mount("a", "alpha", &["page.tsx"], &["shared"]),
                mount("b", "beta", &["page.tsx"], &["shared"]),
            ],
        );

        let (stubs, diagnostics) = generator.stubs();

        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs["shared/page.tsx"].specifier, "beta/app/page");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }

    #[test]
    fn test_preview_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let targets = targets(&temp);
        let generator = Generator::new(
            Registry::new(),
            vec![mount("billing", "billing", &["page.tsx"], &["billing"])],
        );

        let files = generator.preview(&targets);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, targets.output_root.join("billing").join("page.tsx"));
        assert_eq!(files[1].path, targets.declarations);
        assert!(!targets.output_root.exists());
        assert!(!targets.declarations.exists());
    }

    #[test]
    fn test_generate_and_clean() {
        let temp = TempDir::new().unwrap();
        let targets = targets(&temp);
        let mut registry = Registry::new();
        registry.insert(
            "billing",
            RegistryItem {
                provider_id: "billing".to_string(),
                internal_path: "app".to_string(),
                route_files: vec!["page.tsx".to_string()],
                description: None,
            },
        );
        let generator = Generator::new(
            registry,
            vec![mount("billing", "billing", &["page.tsx"], &[])],
        );

        let result = generator.generate(&targets).unwrap();

        assert_eq!(result.stubs, vec!["page.tsx"]);
        assert!(!result.removed_previous);
        assert!(targets.output_root.join("page.tsx").is_file());
        assert!(targets.declarations.is_file());

        let cleaned = generator.clean(&targets).unwrap();
        assert_eq!(cleaned.removed.len(), 2);
        assert!(!targets.output_root.exists());
        assert!(!targets.declarations.exists());
        assert!(clean(&targets).unwrap().is_empty());
    }
}
