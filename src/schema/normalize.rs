//! Field normalization.
//!
//! Raw field descriptions arrive as loosely-typed maps from whichever input
//! format produced them. [`normalize_field`] is the single validated
//! construction step that turns one of them into a canonical [`Field`]:
//! a missing `name` fails fast, everything else degrades to a documented
//! default with the precedence *explicit override, else convention*.

use super::types::{Field, SourceType};
use crate::mappings::TypeMappings;
use crate::naming::to_snake_case;
use anyhow::bail;

/// A raw field description prior to normalization.
///
/// Built by the OpenAPI extractor and the JDL bridge; only `name` is
/// mandatory.
#[derive(Debug, Clone, Default)]
pub struct RawField {
    pub name: Option<String>,
    /// Source-type name; unknown or absent names fall back to `String`.
    pub source_type: Option<String>,
    pub required: bool,
    pub column_name: Option<String>,
    pub kotlin_type: Option<String>,
    pub db_domain: Option<String>,
    pub description: Option<String>,
    pub example: Option<String>,
    pub sql_default: Option<String>,
    pub updatable: Option<bool>,
    pub is_array: bool,
    pub relation_entity: Option<String>,
}

/// Normalize one raw field into the canonical record used by every
/// downstream generator.
///
/// # Errors
///
/// Returns an error if the raw field has no `name` — a fatal configuration
/// error. All other properties resolve via override-else-default.
pub fn normalize_field(raw: &RawField, mappings: &TypeMappings) -> anyhow::Result<Field> {
    let Some(name) = raw.name.as_deref().filter(|n| !n.is_empty()) else {
        bail!("field is missing required key 'name'");
    };

    let source_type = raw
        .source_type
        .as_deref()
        .map(SourceType::parse_lenient)
        .unwrap_or(SourceType::String);

    let column_name = raw
        .column_name
        .clone()
        .unwrap_or_else(|| to_snake_case(name));

    let base_kotlin = raw
        .kotlin_type
        .clone()
        .or_else(|| raw.relation_entity.clone())
        .unwrap_or_else(|| mappings.kotlin_type(source_type).to_string());
    let kotlin_type = if raw.is_array {
        format!("List<{base_kotlin}>")
    } else {
        base_kotlin
    };

    let db_domain = raw
        .db_domain
        .clone()
        .unwrap_or_else(|| mappings.db_domain(source_type).to_string());

    Ok(Field {
        name: name.to_string(),
        source_type,
        required: raw.required,
        column_name,
        kotlin_type,
        db_domain,
        proto_type: mappings.proto_type(source_type).to_string(),
        default_value: mappings.default_value(source_type, raw.required),
        random_value: mappings.random_value(source_type),
        example: raw
            .example
            .clone()
            .unwrap_or_else(|| mappings.example(source_type).to_string()),
        description: raw.description.clone().unwrap_or_default(),
        sql_default: raw.sql_default.clone(),
        updatable: raw.updatable.unwrap_or(true),
        is_array: raw.is_array,
        relation_entity: raw.relation_entity.clone(),
    })
}
