//! Built-in pipeline phases.
//!
//! - [`ScanPhase`] - builds the registry from exposed route groups
//! - [`ResolvePhase`] - resolves mount declarations into host prefixes

mod resolve;
mod scan;

pub use resolve::ResolvePhase;
pub use scan::ScanPhase;
