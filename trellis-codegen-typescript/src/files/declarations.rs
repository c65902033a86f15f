//! The ambient declaration file for mounted routes.
//!
//! The file is a global script (no top-level `export`), so its wildcard
//! `declare module` blocks stay ambient instead of becoming augmentations.

use trellis_codegen::{Registry, builder::CodeBuilder};

use crate::ast::{AmbientModule, Interface, InterfaceField, Union, string_literal};

/// First line of every declaration file.
pub const DECLARATIONS_HEADER: &str = "// Generated by trellis. Do not edit.";

/// Renders the registry as a `.d.ts` file.
#[derive(Debug, Clone)]
pub struct DeclarationFile<'a> {
    registry: &'a Registry,
}

impl<'a> DeclarationFile<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    pub fn render(&self) -> String {
        let builder = CodeBuilder::typescript()
            .line(DECLARATIONS_HEADER)
            .blank();
        let builder = self.routes_interface().render(builder).blank();
        let builder = self.keys_union().render(builder);

        self.registry
            .providers()
            .into_iter()
            .fold(builder, |b, provider| {
                AmbientModule::new(format!("{}/app/*", provider)).render(b.blank())
            })
            .build()
    }

    fn routes_interface(&self) -> Interface {
        self.registry.iter().fold(
            Interface::new("MountedRoutes").doc("Route groups in the registry, by key."),
            |interface, (key, item)| {
                let mut ty = format!("{{ providerId: {}", string_literal(&item.provider_id));
                if let Some(description) = &item.description {
                    ty.push_str(&format!("; description: {}", string_literal(description)));
                }
                ty.push_str(" }");

                let field = InterfaceField::new(string_literal(key), ty);
                interface.field(match &item.description {
                    Some(description) => field.doc(description.clone()),
                    None => field,
                })
            },
        )
    }

    fn keys_union(&self) -> Union {
        self.registry.keys().fold(
            Union::new("MountedRouteKey"),
            |union, key| union.variant(string_literal(key)),
        )
    }
}

#[cfg(test)]
mod tests {
    use trellis_codegen::RegistryItem;

    use super::*;

    fn item(provider: &str, description: Option<&str>) -> RegistryItem {
        RegistryItem {
            provider_id: provider.to_string(),
            internal_path: "app".to_string(),
            route_files: vec!["page.tsx".to_string()],
            description: description.map(str::to_string),
        }
    }

    #[test]
    fn test_render_registry() {
        let mut registry = Registry::new();
        registry.insert("billing", item("@acme/billing", Some("Invoices")));
        registry.insert("docs", item("docs", None));
        registry.insert("docs-admin", item("docs", None));

        insta::assert_snapshot!(DeclarationFile::new(&registry).render(), @r"
        // Generated by trellis. Do not edit.

        /** Route groups in the registry, by key. */
        interface MountedRoutes {
          /** Invoices */
          'billing': { providerId: '@acme/billing'; description: 'Invoices' };
          'docs': { providerId: 'docs' };
          'docs-admin': { providerId: 'docs' };
        }

        type MountedRouteKey = 'billing' | 'docs' | 'docs-admin';

        declare module '@acme/billing/app/*';

        declare module 'docs/app/*';
        ");
    }

    #[test]
    fn test_description_cannot_end_the_doc_comment() {
        let mut registry = Registry::new();
        registry.insert("glob", item("glob", Some("Closes early */ otherwise")));

        let rendered = DeclarationFile::new(&registry).render();

        assert!(rendered.contains("  /** Closes early *\\/ otherwise */\n"));
        assert!(rendered.contains("description: 'Closes early */ otherwise'"));
    }

    #[test]
    fn test_render_empty_registry() {
        let registry = Registry::new();

        insta::assert_snapshot!(DeclarationFile::new(&registry).render(), @r"
        // Generated by trellis. Do not edit.

        /** Route groups in the registry, by key. */
        interface MountedRoutes {}

        type MountedRouteKey = never;
        ");
    }
}
