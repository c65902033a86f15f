//! Registry building and mount resolution for trellis.
//!
//! This crate turns a loaded [`Workspace`](trellis_manifest::Workspace) into
//! the data the emitters need: the route registry and the list of resolved
//! mounts. Language-specific emitters (e.g. `trellis-codegen-typescript`)
//! build on top of it.
//!
//! # Module Organization
//!
//! - [`pipeline`] - Phases, plugins and diagnostics of a generation run
//! - [`builder`] - Code generation building blocks (CodeBuilder, Indent)
//! - [`language`] - Emitter abstractions (LanguageCodegen, OutputTargets, etc.)
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod language;
mod mount;
pub mod pipeline;
mod registry;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use mount::{PackageMountIndex, ResolvedMount, prefix_segments};
pub use registry::{Registry, RegistryItem, import_specifier};
