//! REST controller generation.

use crate::render::{write_output, Renderer};
use crate::schema::EntitySchema;
use serde_json::{json, Value};
use std::path::Path;

/// Build the render context for the REST controller.
pub fn controller_context(schema: &EntitySchema) -> Value {
    json!({
        "packageName": schema.package_name,
        "entityName": schema.name,
        "entityNameLower": schema.name_lower(),
        "entityNamePlural": schema.name_plural(),
        "entityNameLowerPlural": schema.name_lower_plural(),
        "basePath": schema.base_path(),
        "tagName": schema.name_plural(),
        "tagDescription": format!("{} management operations", schema.name),
    })
}

/// Render the controller and write it to `output_path`.
pub fn write_controller(
    renderer: &Renderer,
    schema: &EntitySchema,
    output_path: &Path,
) -> anyhow::Result<()> {
    let context = controller_context(schema);
    let content = renderer.render("kotlin/controller.kt.j2", &context)?;
    write_output(output_path, &content)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::generator::fixtures::organisation_schema;

    #[test]
    fn test_controller_rendering() {
        let renderer = Renderer::new().unwrap();
        let schema = organisation_schema();
        let rendered = renderer
            .render("kotlin/controller.kt.j2", &controller_context(&schema))
            .unwrap();

        assert!(rendered.contains("class OrganisationController("));
        assert!(rendered.contains("@RequestMapping(\"/api/organisations\")"));
        assert!(rendered.contains("@Tag(name = \"Organisations\""));
        assert!(rendered.contains("fun create(@RequestBody create: OrganisationCreate)"));
    }

    #[test]
    fn test_base_path_derivation() {
        let mut schema = organisation_schema();
        schema.name = "BusinessUnit".to_string();
        let context = controller_context(&schema);
        assert_eq!(context["basePath"], "business-units");
        assert_eq!(context["entityNameLowerPlural"], "businessUnits");
    }
}
