//! Pipeline phase trait.

use eyre::Result;

use super::GenerationContext;

/// A phase in the generation pipeline.
///
/// Phases are executed in order by the pipeline. Each phase can read and
/// modify the generation context, adding to the registry, the resolved
/// mounts, or the diagnostics.
///
/// Built-in phases:
/// - `ScanPhase` - builds the registry from every package's exposes
/// - `ResolvePhase` - resolves mount declarations against the registry
pub trait Phase: Send + Sync {
    /// The name of this phase (used in diagnostics and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    /// Run this phase on the generation context.
    ///
    /// # Errors
    ///
    /// Returns an error if the phase fails fatally. Non-fatal issues should
    /// be recorded as diagnostics instead.
    fn run(&self, ctx: &mut GenerationContext) -> Result<()>;
}
