//! Ambient module declaration builder.

use trellis_codegen::builder::CodeBuilder;

use super::string_literal;

/// Builder for shorthand `declare module '<name>';` declarations.
///
/// A shorthand declaration types every import of a matching module as
/// `any`, which is all the wildcard provider modules need.
#[derive(Debug, Clone)]
pub struct AmbientModule {
    name: String,
}

impl AmbientModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Render the module declaration to a CodeBuilder.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        builder.line(&format!("declare module {};", string_literal(&self.name)))
    }

    /// Build the declaration as a string.
    pub fn build(&self) -> String {
        self.render(CodeBuilder::typescript()).build()
    }
}
