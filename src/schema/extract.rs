//! Schema extraction from OpenAPI-style documents.
//!
//! Walks `components.schemas` of a parsed document tree and produces one
//! [`EntitySchema`] per entry. Vendor extensions carry the generator
//! metadata the plain OpenAPI vocabulary cannot express:
//!
//! - `info.x-module-name`, `info.x-base-package`, `info.x-group`
//! - per-schema `x-resource-type`, `x-auditable`, `x-table-name`, `x-indexes`
//! - per-property `x-source-type`, `x-kotlin-type`, `x-db-domain`,
//!   `x-column-name`, `x-default`, `x-generated`
//!
//! Wire `(type, format)` pairs map to source types through a fixed table;
//! unrecognized pairs fall back to the string source type without raising.
//! Properties flagged `x-generated` are skipped — identity columns are
//! supplied automatically by every downstream generator.

use super::normalize::{normalize_field, RawField};
use super::types::{EntitySchema, IndexSpec, ModuleInfo, ResourceScope, SchemaDocument, SourceType};
use crate::mappings::TypeMappings;
use crate::naming::to_snake_case;
use anyhow::{bail, Context};
use serde_json::Value;

/// Extract module metadata from the document's `info` section, applying
/// documented defaults for absent extensions.
pub fn extract_module_info(doc: &Value) -> ModuleInfo {
    let info = doc.get("info").cloned().unwrap_or(Value::Null);
    let defaults = ModuleInfo::default();
    ModuleInfo {
        module_name: str_or(&info, "x-module-name", &defaults.module_name),
        base_package: str_or(&info, "x-base-package", &defaults.base_package),
        group: str_or(&info, "x-group", &defaults.group),
        version: str_or(&info, "version", &defaults.version),
        title: str_or(&info, "title", &defaults.title),
    }
}

/// Map an OpenAPI property to a source type.
///
/// An explicit `x-source-type` override wins; otherwise the wire
/// `(type, format)` pair is looked up in the fixed table, with the string
/// source type as the documented fallback for unknown combinations.
pub fn map_wire_type(prop: &Value) -> SourceType {
    if let Some(name) = prop.get("x-source-type").and_then(Value::as_str) {
        return SourceType::parse_lenient(name);
    }
    let wire_type = prop.get("type").and_then(Value::as_str);
    let format = prop.get("format").and_then(Value::as_str);
    match (wire_type, format) {
        (Some("integer"), Some("int64")) => SourceType::Long,
        (Some("integer"), _) => SourceType::Integer,
        (Some("string"), Some("uuid")) => SourceType::Uuid,
        (Some("string"), Some("date-time")) => SourceType::LocalDateTime,
        (Some("string"), Some("date")) => SourceType::LocalDate,
        (Some("string"), _) => SourceType::String,
        (Some("boolean"), _) => SourceType::Boolean,
        (Some("number"), Some("float")) => SourceType::Float,
        (Some("number"), _) => SourceType::Double,
        _ => SourceType::String,
    }
}

/// Extract every entity schema from the document.
pub fn extract_document(doc: &Value, mappings: &TypeMappings) -> anyhow::Result<SchemaDocument> {
    let info = extract_module_info(doc);
    let schemas = doc
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object)
        .context("document has no 'components.schemas' section")?;

    let mut entities = Vec::with_capacity(schemas.len());
    for (name, schema) in schemas {
        entities.push(
            extract_entity(name, schema, &info.base_package, mappings)
                .with_context(|| format!("failed to extract schema '{name}'"))?,
        );
    }
    Ok(SchemaDocument { info, entities })
}

fn extract_entity(
    name: &str,
    schema: &Value,
    base_package: &str,
    mappings: &TypeMappings,
) -> anyhow::Result<EntitySchema> {
    let scope = match schema.get("x-resource-type") {
        None => ResourceScope::default(),
        Some(value) => {
            let raw = value
                .as_str()
                .with_context(|| format!("x-resource-type must be a string, got {value}"))?;
            match ResourceScope::parse(raw) {
                Some(scope) => scope,
                None => bail!("invalid x-resource-type '{raw}'"),
            }
        }
    };

    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();

    let mut fields = Vec::new();
    if let Some(props) = schema.get("properties").and_then(Value::as_object) {
        for (prop_name, prop) in props {
            if prop.get("x-generated").and_then(Value::as_bool).unwrap_or(false) {
                continue; // id, uuid — injected by the generators
            }
            let raw = raw_field(prop_name, prop, required.contains(&prop_name.as_str()));
            fields.push(normalize_field(&raw, mappings)?);
        }
    }

    let table_name = schema
        .get("x-table-name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| to_snake_case(name));
    let view_name = schema
        .get("x-view-name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("vw_{table_name}"));

    let indexes = match schema.get("x-indexes") {
        None => Vec::new(),
        Some(value) => serde_json::from_value::<Vec<IndexSpec>>(value.clone())
            .context("invalid x-indexes descriptor")?,
    };

    let name_lower = crate::naming::to_camel_case(name);
    Ok(EntitySchema {
        name: name.to_string(),
        package_name: format!("{base_package}.{name_lower}"),
        scope,
        auditable: schema.get("x-auditable").and_then(Value::as_bool).unwrap_or(false),
        fields,
        table_name,
        view_name,
        indexes,
        description: schema
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

fn raw_field(name: &str, prop: &Value, required: bool) -> RawField {
    let is_array = prop.get("type").and_then(Value::as_str) == Some("array");
    // Array properties take their element type from `items`; an array
    // without items degrades to the string fallback below.
    let item = if is_array {
        prop.get("items").unwrap_or(prop)
    } else {
        prop
    };

    let relation_entity = item
        .get("$ref")
        .and_then(Value::as_str)
        .and_then(|r| r.strip_prefix("#/components/schemas/"))
        .map(str::to_string);

    RawField {
        name: Some(name.to_string()),
        source_type: Some(map_wire_type(item).as_str().to_string()),
        required,
        column_name: field_str(prop, "x-column-name"),
        kotlin_type: field_str(prop, "x-kotlin-type"),
        db_domain: field_str(prop, "x-db-domain"),
        description: field_str(prop, "description"),
        example: prop.get("example").map(example_literal),
        sql_default: field_str(prop, "x-default"),
        updatable: prop.get("x-updatable").and_then(Value::as_bool),
        is_array,
        relation_entity,
    }
}

fn field_str(prop: &Value, key: &str) -> Option<String> {
    prop.get(key).and_then(Value::as_str).map(str::to_string)
}

fn str_or(obj: &Value, key: &str, default: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn example_literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
