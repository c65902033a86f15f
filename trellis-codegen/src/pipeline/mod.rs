//! Generation pipeline.
//!
//! A [`Pipeline`] runs the resolution phases over a freshly loaded
//! workspace:
//!
//! - `scan` builds the [`Registry`](crate::Registry) from every package's
//!   exposed route groups
//! - `resolve` walks mount declarations host-first and produces the
//!   [`ResolvedMount`](crate::ResolvedMount) list
//!
//! Plugins hook in before and after each phase; [`SnapshotPlugin`] uses
//! that to dump the registry for debugging.
//!
//! # Example
//!
//! ```ignore
//! use trellis_codegen::pipeline::{Pipeline, Severity};
//!
//! let workspace = Workspace::load(".")?;
//! let host = workspace.host(None)?.id.clone();
//! let ctx = Pipeline::new().run(workspace, host)?;
//!
//! for diag in ctx.warnings() {
//!     eprintln!("warning: {}", diag.message);
//! }
//! ```

mod context;
mod diagnostic;
mod phase;
pub mod phases;
mod plugin;
mod runner;
mod snapshot;

pub use context::GenerationContext;
pub use diagnostic::{Diagnostic, Severity};
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
pub use snapshot::{DEBUG_ENV, SNAPSHOT_FILE, SnapshotPlugin, debug_enabled};
