//! Core utilities and types for the trellis route composer.
//!
//! This crate provides the filesystem primitives shared across the
//! trellis ecosystem: writing generated files, discovering route files,
//! and composing forward-slash path segments.

mod discover;
mod file;
mod paths;

// Route file discovery
pub use discover::{ROUTE_EXTENSIONS, ROUTE_NAMES, RoutePatterns, discover};
// File operations
pub use file::{File, GeneratedFile, WriteResult, remove_dir_if_exists};
// Path utilities
pub use paths::{is_empty_segment, join_segments, strip_extension, to_forward_slash};
