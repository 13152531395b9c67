//! Data-model (resource DTO) generation.
//!
//! One entity produces four Kotlin files: the resource model itself, the
//! create input, the update input (all fields optional), and the read-only
//! interface. Identity fields (`id`, `uuid`) are injected here — the input
//! schema never carries them.

use crate::mappings::TypeMappings;
use crate::render::{write_output, Renderer};
use crate::schema::{EntitySchema, Field};
use clap::ValueEnum;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::path::Path;

/// The resource variants the data-model generator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceVariant {
    /// Full resource model with identity and audit fields
    Model,
    /// Create input (no identity beyond uuid)
    Create,
    /// Update input (every field optional)
    Update,
    /// Read-only interface
    Interface,
}

impl ResourceVariant {
    pub const ALL: [ResourceVariant; 4] = [
        ResourceVariant::Model,
        ResourceVariant::Create,
        ResourceVariant::Update,
        ResourceVariant::Interface,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceVariant::Model => "model",
            ResourceVariant::Create => "create",
            ResourceVariant::Update => "update",
            ResourceVariant::Interface => "interface",
        }
    }

    /// File name of the generated variant, e.g. `OrganisationCreate.kt`.
    pub fn file_name(&self, entity_name: &str) -> String {
        match self {
            ResourceVariant::Model => format!("{entity_name}.kt"),
            ResourceVariant::Create => format!("{entity_name}Create.kt"),
            ResourceVariant::Update => format!("{entity_name}Update.kt"),
            ResourceVariant::Interface => format!("I{entity_name}.kt"),
        }
    }
}

impl std::fmt::Display for ResourceVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Imports required by the fields themselves (java.time, java.util, ...).
pub(crate) fn field_imports(fields: &[Field], mappings: &TypeMappings) -> BTreeSet<String> {
    let mut imports = BTreeSet::new();
    for field in fields {
        let ty = field
            .kotlin_type
            .strip_prefix("List<")
            .and_then(|s| s.strip_suffix('>'))
            .unwrap_or(&field.kotlin_type);
        if let Some(import) = mappings.kotlin_import(ty) {
            imports.insert(import.to_string());
        }
    }
    imports
}

/// Build the render context for one resource variant.
pub fn resource_context(
    schema: &EntitySchema,
    variant: ResourceVariant,
    group: &str,
    mappings: &TypeMappings,
) -> Value {
    let mut imports = field_imports(&schema.fields, mappings);
    match variant {
        ResourceVariant::Model => {
            imports.insert(format!("{group}.common.domain.IdentityID"));
            imports.insert(format!("{group}.common.domain.IdentityUUID"));
            imports.insert(format!("{group}.common.model.audit.ResourceAudit"));
            imports.insert(format!("{group}.common.model.resource.ResourceType"));
            imports.insert(format!(
                "{group}.common.model.resource.{}",
                schema.scope.resource_base()
            ));
        }
        ResourceVariant::Create => {
            imports.insert(format!("{group}.api.common.model.resource.BaseCreateResource"));
            imports.insert(format!("{group}.common.domain.IdentityUUID"));
        }
        ResourceVariant::Update => {
            imports.insert(format!("{group}.api.common.model.resource.BaseUpdateResource"));
            imports.insert(format!("{group}.common.domain.IdentityUUID"));
        }
        ResourceVariant::Interface => {
            imports.insert(format!("{group}.common.domain.IdentityID"));
            imports.insert(format!("{group}.common.domain.IdentityUUID"));
        }
    }

    let description = if schema.description.is_empty() {
        format!("Represents a {} within the system.", schema.name_lower())
    } else {
        schema.description.clone()
    };

    let fields: Vec<Value> = schema
        .fields
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "kotlinType": f.kotlin_type,
                "nullable": !f.required,
                "description": f.description,
                "example": f.example,
            })
        })
        .collect();

    json!({
        "variant": variant.as_str(),
        "packageName": schema.package_name,
        "name": schema.name,
        "nameLower": schema.name_lower(),
        "nameUpperSnake": schema.name_upper_snake(),
        "resourceBase": schema.scope.resource_base(),
        "description": description,
        "fields": fields,
        "imports": imports.into_iter().collect::<Vec<_>>(),
    })
}

/// Render one resource variant and write it to `output_path`.
pub fn write_resource(
    renderer: &Renderer,
    schema: &EntitySchema,
    variant: ResourceVariant,
    group: &str,
    mappings: &TypeMappings,
    output_path: &Path,
) -> anyhow::Result<()> {
    let context = resource_context(schema, variant, group, mappings);
    let content = renderer.render("kotlin/resource.kt.j2", &context)?;
    write_output(output_path, &content)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::generator::fixtures::organisation_schema;

    #[test]
    fn test_model_variant_contains_typed_fields() {
        let renderer = Renderer::new().unwrap();
        let mappings = TypeMappings::default();
        let schema = organisation_schema();
        let context = resource_context(&schema, ResourceVariant::Model, "net.blugrid", &mappings);
        let rendered = renderer.render("kotlin/resource.kt.j2", &context).unwrap();

        assert!(rendered.contains("data class Organisation("));
        assert!(rendered.contains("var parentOrganisationId: Long,"));
        assert!(rendered.contains("var effectiveTimestamp: LocalDateTime,"));
        // Identity fields are injected automatically.
        assert!(rendered.contains("override var id: IdentityID,"));
        assert!(rendered.contains("override var uuid: IdentityUUID,"));
        assert!(rendered.contains("UnscopedResource<Organisation>(audit)"));
        assert!(rendered.contains("ResourceType.ORGANISATION"));
        assert!(rendered.contains("import java.time.LocalDateTime"));
    }

    #[test]
    fn test_update_variant_is_all_optional() {
        let renderer = Renderer::new().unwrap();
        let mappings = TypeMappings::default();
        let schema = organisation_schema();
        let context = resource_context(&schema, ResourceVariant::Update, "net.blugrid", &mappings);
        let rendered = renderer.render("kotlin/resource.kt.j2", &context).unwrap();

        assert!(rendered.contains("data class OrganisationUpdate("));
        assert!(rendered.contains("var parentOrganisationId: Long? = null,"));
        assert!(rendered.contains("BaseUpdateResource<OrganisationUpdate>(uuid)"));
    }

    #[test]
    fn test_variant_file_names() {
        assert_eq!(ResourceVariant::Model.file_name("Organisation"), "Organisation.kt");
        assert_eq!(ResourceVariant::Create.file_name("Organisation"), "OrganisationCreate.kt");
        assert_eq!(ResourceVariant::Interface.file_name("Organisation"), "IOrganisation.kt");
    }
}
