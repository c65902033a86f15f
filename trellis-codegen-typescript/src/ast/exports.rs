//! TypeScript export builder.

use trellis_codegen::builder::CodeBuilder;

use super::string_literal;

/// Builder for TypeScript re-export statements.
#[derive(Debug, Clone)]
pub struct Export {
    from: Option<String>,
    named: Vec<String>,
}

impl Export {
    pub fn new() -> Self {
        Self {
            from: None,
            named: Vec::new(),
        }
    }

    /// Re-export from another module.
    pub fn from(mut self, module: impl Into<String>) -> Self {
        self.from = Some(module.into());
        self
    }

    /// Export a named item.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Render the export to a CodeBuilder.
    ///
    /// Without a source module there is nothing to re-export and the builder
    /// is returned unchanged.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let Some(from) = &self.from else {
            return builder;
        };

        let export_str = if self.named.is_empty() {
            // export * from 'module'
            format!("export * from {};", string_literal(from))
        } else {
            // export { a, b } from 'module'
            format!(
                "export {{ {} }} from {};",
                self.named.join(", "),
                string_literal(from)
            )
        };
        builder.line(&export_str)
    }

    /// Build the export as a string.
    pub fn build(&self) -> String {
        self.render(CodeBuilder::typescript()).build()
    }
}

impl Default for Export {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_re_export_all() {
        let e = Export::new().from("billing/app/page").build();
        assert_eq!(e, "export * from 'billing/app/page';\n");
    }

    #[test]
    fn test_re_export_default() {
        let e = Export::new().from("billing/app/page").named("default").build();
        assert_eq!(e, "export { default } from 'billing/app/page';\n");
    }

    #[test]
    fn test_without_source_renders_nothing() {
        let e = Export::new().named("default").build();
        assert_eq!(e, "");
    }
}
