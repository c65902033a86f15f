//! TypeScript interface builder.

use trellis_codegen::builder::CodeBuilder;

/// A field in a TypeScript interface.
#[derive(Debug, Clone)]
pub struct InterfaceField {
    pub name: String,
    pub ty: String,
    pub doc: Option<String>,
}

impl InterfaceField {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Builder for global (non-exported) TypeScript interfaces.
#[derive(Debug, Clone)]
pub struct Interface {
    name: String,
    doc: Option<String>,
    fields: Vec<InterfaceField>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn field(mut self, field: InterfaceField) -> Self {
        self.fields.push(field);
        self
    }

    /// Render the interface to a CodeBuilder.
    pub fn render(&self, builder: CodeBuilder) -> CodeBuilder {
        let builder = match &self.doc {
            Some(doc) => builder.jsdoc(doc),
            None => builder,
        };

        if self.fields.is_empty() {
            return builder.line(&format!("interface {} {{}}", self.name));
        }

        builder.block_with_close(&format!("interface {} {{", self.name), "}", |b| {
            b.each(&self.fields, |b, field| {
                let b = match &field.doc {
                    Some(doc) => b.jsdoc(doc),
                    None => b,
                };
                b.line(&format!("{}: {};", field.name, field.ty))
            })
        })
    }

    /// Build the interface as a string.
    pub fn build(&self) -> String {
        self.render(CodeBuilder::typescript()).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_interface() {
        let i = Interface::new("MountedRoutes").build();
        assert_eq!(i, "interface MountedRoutes {}\n");
    }

    #[test]
    fn test_interface_with_docs() {
        let i = Interface::new("Routes")
            .doc("Every route group.")
            .field(InterfaceField::new("'billing'", "Route").doc("Invoices"))
            .field(InterfaceField::new("'docs'", "Route"))
            .build();

        assert_eq!(
            i,
            "/** Every route group. */\ninterface Routes {\n  /** Invoices */\n  'billing': Route;\n  'docs': Route;\n}\n"
        );
    }
}
