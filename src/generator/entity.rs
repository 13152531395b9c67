//! JPA entity generation for the persistence layer.

use crate::mappings::TypeMappings;
use crate::render::{write_output, Renderer};
use crate::schema::EntitySchema;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::path::Path;

/// Build the render context for the entity class.
///
/// The entity base class follows the resource scope; `uuid` always pulls in
/// `java.util.UUID` on top of whatever the fields need.
pub fn entity_context(schema: &EntitySchema, group: &str, mappings: &TypeMappings) -> Value {
    let mut imports: BTreeSet<String> = super::model::field_imports(&schema.fields, mappings);
    imports.insert("java.util.UUID".to_string());

    let fields: Vec<Value> = schema
        .fields
        .iter()
        .map(|f| {
            json!({
                "name": f.name,
                "type": f.kotlin_type,
                "columnName": f.column_name,
                "nullable": !f.required,
                "updatable": f.updatable,
            })
        })
        .collect();

    json!({
        "packageName": schema.package_name,
        "entityName": schema.name,
        "tableName": schema.table_name,
        "viewName": schema.view_name,
        "sequenceName": schema.sequence_name(),
        "extends": schema.scope.persistable_base(),
        "group": group,
        "fields": fields,
        "imports": imports.into_iter().collect::<Vec<_>>(),
    })
}

/// Render the entity class and write it to `output_path`.
pub fn write_entity(
    renderer: &Renderer,
    schema: &EntitySchema,
    group: &str,
    mappings: &TypeMappings,
    output_path: &Path,
) -> anyhow::Result<()> {
    let context = entity_context(schema, group, mappings);
    let content = renderer.render("kotlin/entity.kt.j2", &context)?;
    write_output(output_path, &content)
}
