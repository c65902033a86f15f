//! Generated file renderers.

mod declarations;
mod stub;

pub use declarations::{DECLARATIONS_HEADER, DeclarationFile};
pub use stub::StubFile;
