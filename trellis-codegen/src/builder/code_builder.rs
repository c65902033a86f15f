//! Code builder utility for generating properly indented code.

use super::Indent;

/// Fluent API for building code with proper indentation.
///
/// Supports both consuming methods (returning `Self`) for chaining and
/// mutable methods (returning `&mut Self`) for loops.
///
/// # Example
///
/// ```
/// use trellis_codegen::builder::CodeBuilder;
///
/// let code = CodeBuilder::typescript()
///     .line("interface Route {")
///     .indent()
///     .line("providerId: string;")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(code, "interface Route {\n  providerId: string;\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation.
    pub fn typescript() -> Self {
        Self::new(Indent::TYPESCRIPT)
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line of code with current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str(s);
        self.buffer.push('\n');
        self
    }

    /// Add a blank line (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.buffer.push('\n');
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.indent_level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.indent_level = self.indent_level.saturating_sub(1);
        self
    }

    /// Add a JSDoc comment (mutable).
    ///
    /// A `*/` inside `text` is written as `*\/` so it cannot close the
    /// comment early.
    pub fn push_jsdoc(&mut self, text: &str) -> &mut Self {
        self.write_indent();
        self.buffer.push_str("/** ");
        self.buffer.push_str(&text.replace("*/", "*\\/"));
        self.buffer.push_str(" */\n");
        self
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    /// Add a line of code with current indentation.
    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    /// Add a blank line.
    pub fn blank(mut self) -> Self {
        self.push_blank();
        self
    }

    /// Increase indentation level.
    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    /// Decrease indentation level.
    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Add a block with a closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Add a JSDoc comment (`/** text */`).
    pub fn jsdoc(mut self, text: &str) -> Self {
        self.push_jsdoc(text);
        self
    }

    /// Iterate and add content for each item.
    pub fn each<T, I, F>(mut self, items: I, f: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(Self, T) -> Self,
    {
        for item in items {
            self = f(self, item);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::typescript()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_line() {
        let code = CodeBuilder::typescript().line("export {};").build();
        assert_eq!(code, "export {};\n");
    }

    #[test]
    fn test_block_with_close() {
        let code = CodeBuilder::typescript()
            .block_with_close("declare module 'billing/app/*' {", "}", |b| {
                b.line("const mod: unknown;")
            })
            .build();

        assert_eq!(
            code,
            "declare module 'billing/app/*' {\n  const mod: unknown;\n}\n"
        );
    }

    #[test]
    fn test_jsdoc_is_indented() {
        let code = CodeBuilder::typescript()
            .indent()
            .jsdoc("Invoices")
            .line("billing: Route;")
            .build();

        assert_eq!(code, "  /** Invoices */\n  billing: Route;\n");
    }

    #[test]
    fn test_jsdoc_cannot_close_early() {
        let code = CodeBuilder::typescript().jsdoc("a */ b").build();
        assert_eq!(code, "/** a *\\/ b */\n");
    }

    #[test]
    fn test_each() {
        let code = CodeBuilder::typescript()
            .each(["a", "b"], |b, name| b.line(&format!("| '{}'", name)))
            .build();

        assert_eq!(code, "| 'a'\n| 'b'\n");
    }

    #[test]
    fn test_mutable_api_and_dedent_saturates() {
        let mut builder = CodeBuilder::typescript();
        builder
            .push_dedent()
            .push_line("type A =")
            .push_indent()
            .push_line("| 'a';")
            .push_blank();

        assert_eq!(builder.build(), "type A =\n  | 'a';\n\n");
    }
}
