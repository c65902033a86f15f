//! TypeScript AST builders for the generated stubs and declarations.
//!
//! These provide a high-level API for constructing TypeScript syntax,
//! which can then be rendered via CodeBuilder.

mod exports;
mod interface;
mod literal;
mod module;
mod types;

pub use exports::Export;
pub use interface::{Interface, InterfaceField};
pub use literal::string_literal;
pub use module::AmbientModule;
pub use types::Union;
