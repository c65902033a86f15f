//! Manifest parsing and workspace loading for trellis.
//!
//! Three files are understood:
//!
//! - `trellis.toml` at the workspace root ([`WorkspaceConfig`])
//! - `routes.toml` in each package ([`RoutesManifest`])
//! - `package.json` in each package, for the declared package name
//!
//! Every load reads from disk; nothing is cached between calls.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod package;
mod routes;
mod workspace;

pub use config::{CONFIG_FILE, DEFAULT_DECLARATIONS, DEFAULT_OUTPUT, WorkspaceConfig};
pub use error::{Error, Result, SourceContext};
pub use package::{PACKAGE_JSON, Package, read_package_name};
pub use routes::{ExposeEntry, MountGroup, ROUTES_FILE, RoutesManifest, parse_routes};
pub use workspace::Workspace;
