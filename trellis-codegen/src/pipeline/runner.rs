//! Pipeline orchestrator.

use std::path::PathBuf;

use eyre::Result;
use trellis_core::RoutePatterns;
use trellis_manifest::Workspace;

use super::{
    GenerationContext, Phase, Plugin,
    phases::{ResolvePhase, ScanPhase},
};

/// The generation pipeline orchestrator.
///
/// Runs the built-in phases (scan, resolve) followed by any user phases,
/// calling plugin hooks before and after each phase. A pipeline holds no
/// state between runs; every run starts from the workspace it is given.
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
    patterns: RoutePatterns,
}

impl Pipeline {
    /// Create a new pipeline with default built-in phases.
    pub fn new() -> Self {
        Self {
            phases: Vec::new(),
            plugins: Vec::new(),
            patterns: RoutePatterns::default(),
        }
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Use a custom route file pattern set for the scan.
    pub fn patterns(mut self, patterns: RoutePatterns) -> Self {
        self.patterns = patterns;
        self
    }

    /// Keep the scan out of `dir`, typically a previous run's output.
    pub fn exclude(mut self, dir: impl Into<PathBuf>) -> Self {
        self.patterns = self.patterns.exclude(dir);
        self
    }

    /// Run the pipeline on a workspace.
    ///
    /// Executes all phases in order:
    /// 1. ScanPhase - builds the registry
    /// 2. ResolvePhase - resolves mounts against the registry
    /// 3. User phases (if any)
    ///
    /// # Errors
    ///
    /// Returns an error if any phase or plugin fails fatally.
    pub fn run(&self, workspace: Workspace, host_id: impl Into<String>) -> Result<GenerationContext> {
        let mut ctx = GenerationContext::new(workspace, host_id);
        ctx.patterns = self.patterns.clone();

        let builtin_phases: Vec<Box<dyn Phase>> = vec![Box::new(ScanPhase), Box::new(ResolvePhase)];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    /// Run a single phase with plugin hooks.
    fn run_phase(&self, phase: &dyn Phase, ctx: &mut GenerationContext) -> Result<()> {
        let phase_name = phase.name();

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        phase.run(ctx)?;

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        path::PathBuf,
        sync::{
            Arc, Mutex,
            atomic::{AtomicUsize, Ordering},
        },
    };

    use trellis_manifest::{Package, WorkspaceConfig};

    use super::*;
    use crate::pipeline::Diagnostic;

    struct RecordingPlugin {
        phases: Arc<Mutex<Vec<String>>>,
        after_count: Arc<AtomicUsize>,
    }

    impl Plugin for RecordingPlugin {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn on_before_phase(&self, phase: &str, _ctx: &mut GenerationContext) -> Result<()> {
            self.phases.lock().unwrap().push(phase.to_string());
            Ok(())
        }

        fn on_after_phase(&self, _phase: &str, _ctx: &mut GenerationContext) -> Result<()> {
            self.after_count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct CountMountsPhase;

    impl Phase for CountMountsPhase {
        fn name(&self) -> &'static str {
            "count"
        }

        fn description(&self) -> &'static str {
            "Count resolved mounts"
        }

        fn run(&self, ctx: &mut GenerationContext) -> Result<()> {
            let count = ctx.mounts.as_ref().map_or(0, Vec::len);
            ctx.diagnostics
                .push(Diagnostic::info("count", format!("{} mounts", count)));
            Ok(())
        }
    }

    fn empty_workspace() -> Workspace {
        Workspace::from_packages(
            "/ws",
            WorkspaceConfig::default(),
            vec![Package {
                id: "web".to_string(),
                dir: PathBuf::from("/ws/packages/web"),
                manifest: None,
            }],
        )
    }

    #[test]
    fn test_pipeline_runs_phases() {
        let ctx = Pipeline::new()
            .run(empty_workspace(), "web")
            .expect("pipeline should succeed");

        assert!(ctx.registry.is_some());
        assert!(ctx.mounts.is_some());
    }

    #[test]
    fn test_pipeline_plugin_hooks_and_user_phase() {
        let phases = Arc::new(Mutex::new(Vec::new()));
        let after_count = Arc::new(AtomicUsize::new(0));
        let plugin = RecordingPlugin {
            phases: phases.clone(),
            after_count: after_count.clone(),
        };

        let ctx = Pipeline::new()
            .plugin(plugin)
            .phase(CountMountsPhase)
            .run(empty_workspace(), "web")
            .expect("pipeline should succeed");

        assert_eq!(*phases.lock().unwrap(), vec!["scan", "resolve", "count"]);
        assert_eq!(after_count.load(Ordering::SeqCst), 3);
        assert!(ctx.diagnostics.iter().any(|d| d.message == "0 mounts"));
    }
}
