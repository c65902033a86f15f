//! Re-export stub and declaration emitter for trellis.
//!
//! Turns the registry and resolved mounts of a pipeline run into files
//! under the host package:
//!
//! - one stub per mounted route file, re-exporting the provider's original
//!   module (`export { default } from '...'` and `export * from '...'`)
//! - a `.d.ts` file describing the registry keys and declaring a wildcard
//!   module per provider
//!
//! # Usage
//!
//! ```ignore
//! use trellis_codegen::{language::OutputTargets, pipeline::Pipeline};
//! use trellis_codegen_typescript::{Generator, LanguageCodegen};
//! use trellis_manifest::Workspace;
//!
//! let workspace = Workspace::load(".")?;
//! let host = workspace.host(None)?;
//! let targets = OutputTargets::for_host(&host.dir, workspace.config(), None);
//! let host_id = host.id.clone();
//!
//! let mut ctx = Pipeline::new().run(workspace, host_id)?;
//! let result = Generator::from_context(&mut ctx).generate(&targets)?;
//! ```

mod generator;

pub mod ast;
pub mod files;

pub use generator::{Generator, clean};
pub use trellis_codegen::language::{
    CleanResult, GenerateResult, LanguageCodegen, OutputTargets, PreviewFile,
};
