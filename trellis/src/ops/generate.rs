//! Generate operation - emit stubs and declarations for the host.

use eyre::{Context, Result};
use trellis_codegen::pipeline::{Pipeline, SNAPSHOT_FILE, SnapshotPlugin};
use trellis_codegen_typescript::{Generator, LanguageCodegen};

use super::Session;
use crate::reports::{GenerateReport, GenerationResult, PreviewFile, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions {
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Whether to write the registry snapshot.
    pub snapshot: bool,
}

/// Execute the generate operation.
///
/// Runs the pipeline on the workspace, wipes the previous output and writes
/// a fresh stub tree and declaration file. A dry run touches nothing on
/// disk, including the snapshot.
pub fn generate(session: Session, opts: GenerateOptions) -> Result<GenerateReport> {
    let snapshot = opts.snapshot && !opts.dry_run;
    let snapshot_path = session.snapshot_dir.join(SNAPSHOT_FILE);
    let targets = session.targets.clone();
    let host = session.host_id.clone();

    let mut pipeline = Pipeline::new();
    if snapshot {
        pipeline = pipeline.plugin(SnapshotPlugin::new(&session.snapshot_dir));
    }
    let mut ctx = session.run(pipeline)?;

    let generator = Generator::from_context(&mut ctx);
    let mut diagnostics = ctx.diagnostics;

    let result = if opts.dry_run {
        let files = generator
            .preview(&targets)
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path.display().to_string(),
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(files)
    } else {
        let gen_result = generator
            .generate(&targets)
            .wrap_err("Failed to generate route stubs")?;
        diagnostics.extend(gen_result.diagnostics);

        GenerationResult::Written(WrittenResult {
            output_root: targets.output_root.clone(),
            declarations: targets.declarations.clone(),
            stubs: gen_result.stubs,
            removed_previous: gen_result.removed_previous,
            snapshot: snapshot.then_some(snapshot_path),
        })
    };

    Ok(GenerateReport {
        host,
        registry_count: generator.registry().len(),
        mount_count: generator.mounts().len(),
        diagnostics,
        result,
    })
}

#[cfg(test)]
mod tests {
    use trellis_codegen::testing::WorkspaceFixture;

    use super::*;

    fn workspace() -> WorkspaceFixture {
        let ws = WorkspaceFixture::new().unwrap();
        ws.package(
            "web",
            "[[mount_routes]]\nname = \"main\"\nfeatures = { docs = \"docs\" }\n",
        )
        .unwrap();
        ws.package("docs", "[[expose_routes]]\nname = \"docs\"\n").unwrap();
        ws.route("docs", "page.tsx").unwrap();
        ws
    }

    #[test]
    fn test_generate_writes_output_and_snapshot() {
        let ws = workspace();
        let session = Session::open(ws.root(), Some("web"), None).unwrap();

        let report = generate(
            session,
            GenerateOptions {
                dry_run: false,
                snapshot: true,
            },
        )
        .unwrap();

        let GenerationResult::Written(written) = &report.result else {
            panic!("expected written result");
        };
        assert_eq!(written.stubs, vec!["docs/page.tsx"]);
        assert_eq!(report.mount_count, 1);
        let snapshot = written.snapshot.as_ref().unwrap();
        assert!(ws.read(snapshot).unwrap().contains("\"providerId\": \"docs\""));
        assert!(ws.package_dir("web").join("mounted-routes.d.ts").is_file());
    }

    #[test]
    fn test_repeated_runs_ignore_previous_output() {
        let ws = WorkspaceFixture::new().unwrap();
        ws.package(
            "web",
            "[[expose_routes]]\nname = \"site\"\n\n\
             [[mount_routes]]\nname = \"main\"\nfeatures = { site = \"mirror\" }\n",
        )
        .unwrap();
        ws.route("web", "app/page.tsx").unwrap();

        let mut stubs = Vec::new();
        for _ in 0..3 {
            let session = Session::open(ws.root(), None, None).unwrap();
            let report = generate(
                session,
                GenerateOptions {
                    dry_run: false,
                    snapshot: true,
                },
            )
            .unwrap();
            let GenerationResult::Written(written) = report.result else {
                panic!("expected written result");
            };
            stubs.push(written.stubs);
        }

        assert_eq!(stubs[0], vec!["mirror/app/page.tsx"]);
        assert_eq!(stubs[0], stubs[1]);
        assert_eq!(stubs[1], stubs[2]);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let ws = workspace();
        let session = Session::open(ws.root(), Some("web"), None).unwrap();

        let report = generate(
            session,
            GenerateOptions {
                dry_run: true,
                snapshot: true,
            },
        )
        .unwrap();

        let GenerationResult::Preview(files) = &report.result else {
            panic!("expected preview");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(
            ws.files("packages/web").unwrap(),
            vec!["package.json", "routes.toml"]
        );
    }
}
