//! Test-factory generation.
//!
//! Factories create default and randomized fixture instances of the
//! Create/Update inputs. The per-type fixture expressions come from the
//! mapping table; required fields always receive a concrete value.

use crate::mappings::TypeMappings;
use crate::render::{write_output, Renderer};
use crate::schema::EntitySchema;
use serde_json::{json, Value};
use std::path::Path;

/// Build the render context for the test factory.
pub fn factory_context(schema: &EntitySchema, group: &str, mappings: &TypeMappings) -> Value {
    let fields: Vec<Value> = schema
        .fields
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "type": f.source_type.as_str(),
                "required": f.required,
                "defaultValue": f.default_value,
                "randomValue": f.random_value,
            })
        })
        .collect();

    let imports = super::model::field_imports(&schema.fields, mappings);

    json!({
        "packageName": schema.package_name,
        "entityName": schema.name,
        "entityNameLower": schema.name_lower(),
        "group": group,
        "fields": fields,
        "imports": imports.into_iter().collect::<Vec<_>>(),
    })
}

/// Render the test factory and write it to `output_path`.
pub fn write_test_factory(
    renderer: &Renderer,
    schema: &EntitySchema,
    group: &str,
    mappings: &TypeMappings,
    output_path: &Path,
) -> anyhow::Result<()> {
    let context = factory_context(schema, group, mappings);
    let content = renderer.render("kotlin/test_factory.kt.j2", &context)?;
    write_output(output_path, &content)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::generator::fixtures::organisation_schema;

    #[test]
    fn test_factory_rendering() {
        let renderer = Renderer::new().unwrap();
        let mappings = TypeMappings::default();
        let schema = organisation_schema();
        let rendered = renderer
            .render(
                "kotlin/test_factory.kt.j2",
                &factory_context(&schema, "net.blugrid", &mappings),
            )
            .unwrap();

        assert!(rendered.contains("object OrganisationTestFactory {"));
        assert!(rendered.contains("parentOrganisationId = Long.random(),"));
        assert!(rendered.contains("effectiveTimestamp = java.time.LocalDateTime.now(),"));
        assert!(rendered
            .contains("effectiveTimestamp = java.time.LocalDateTime.now().minusDays(Long.random(1, 365)),"));
        assert!(rendered.contains("uuid = IdentityUUIDRandom.generate(),"));
    }
}
