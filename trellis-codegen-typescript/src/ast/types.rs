//! TypeScript union type builder.

use trellis_codegen::builder::CodeBuilder;

/// Builder for global (non-exported) TypeScript union types.
///
/// A union without variants renders as `never`.
#[derive(Debug, Clone)]
pub struct Union {
    name: String,
    variants: Vec<String>,
}

impl Union {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    pub fn variant(mut self, variant: impl Into<String>) -> Self {
        self.variants.push(variant.into());
        self
    }

    /// Render the union type to a CodeBuilder.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let variants = if self.variants.is_empty() {
            "never".to_string()
        } else {
            self.variants.join(" | ")
        };

        builder.line(&format!("type {} = {};", self.name, variants))
    }

    /// Build the union type as a string.
    pub fn build(&self) -> String {
        self.render(CodeBuilder::typescript()).build()
    }
}
