//! TypeScript client-binding generation: model classes with typed
//! fromJson/toJson coercion, and a fetch-based API client per entity.

use crate::mappings::TypeMappings;
use crate::render::{write_output, Renderer};
use crate::schema::{EntitySchema, Field, SourceType};
use serde_json::{json, Value};
use std::path::Path;

/// TypeScript model variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsVariant {
    Model,
    Create,
    Update,
}

impl TsVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            TsVariant::Model => "model",
            TsVariant::Create => "create",
            TsVariant::Update => "update",
        }
    }

    pub fn class_name(&self, entity_name: &str) -> String {
        match self {
            TsVariant::Model => entity_name.to_string(),
            TsVariant::Create => format!("{entity_name}Create"),
            TsVariant::Update => format!("{entity_name}Update"),
        }
    }
}

/// TypeScript type of a field.
fn ts_type(field: &Field, mappings: &TypeMappings) -> String {
    let base = field
        .relation_entity
        .clone()
        .unwrap_or_else(|| mappings.ts_type(field.source_type).to_string());
    if field.is_array {
        format!("{base}[]")
    } else {
        base
    }
}

/// The fromJson coercion expression for a field.
///
/// Dates become `Date` objects, numbers go through `Number`, booleans
/// through `Boolean`, relations recurse through their own `fromJson`;
/// everything else coerces to string.
fn from_json_expr(field: &Field, mappings: &TypeMappings, required: bool) -> String {
    let accessor = format!("obj.{}", field.name);

    if let Some(entity) = &field.relation_entity {
        return if field.is_array {
            if required {
                format!("({accessor} as unknown[]).map({entity}.fromJson)")
            } else {
                format!("{accessor} ? ({accessor} as unknown[]).map({entity}.fromJson) : undefined")
            }
        } else if required {
            format!("{entity}.fromJson({accessor})")
        } else {
            format!("{accessor} ? {entity}.fromJson({accessor}) : undefined")
        };
    }

    if field.source_type.is_date_like() && !field.is_array {
        return if required {
            format!("new Date({accessor} as string)")
        } else {
            format!("{accessor} ? new Date({accessor} as string) : undefined")
        };
    }

    if field.source_type.is_number_like() && !field.is_array {
        return if required {
            format!("Number({accessor})")
        } else {
            format!("{accessor} !== undefined && {accessor} !== null ? Number({accessor}) : undefined")
        };
    }

    if field.source_type == SourceType::Boolean && !field.is_array {
        return if required {
            format!("Boolean({accessor})")
        } else {
            format!("{accessor} !== undefined && {accessor} !== null ? Boolean({accessor}) : undefined")
        };
    }

    if field.is_array {
        let ty = ts_type(field, mappings);
        return if required {
            format!("{accessor} as {ty}")
        } else {
            format!("{accessor} ? {accessor} as {ty} : undefined")
        };
    }

    if required {
        format!("String({accessor})")
    } else {
        format!("{accessor} ? String({accessor}) : undefined")
    }
}

/// The toJson expression for a field.
fn to_json_expr(field: &Field, required: bool) -> String {
    let accessor = format!("this.{}", field.name);

    if field.relation_entity.is_some() {
        return match (field.is_array, required) {
            (true, true) => format!("{accessor}.map(item => item.toJson())"),
            (true, false) => format!("{accessor}?.map(item => item.toJson())"),
            (false, true) => format!("{accessor}.toJson()"),
            (false, false) => format!("{accessor}?.toJson()"),
        };
    }

    if field.source_type.is_date_like() && !field.is_array {
        return if required {
            format!("{accessor}.toISOString()")
        } else {
            format!("{accessor}?.toISOString()")
        };
    }

    accessor
}

fn ts_field(field: &Field, mappings: &TypeMappings, force_optional: bool) -> Value {
    let required = field.required && !force_optional;
    json!({
        "name": field.name,
        "tsType": ts_type(field, mappings),
        "required": required,
        "fromJsonExpr": from_json_expr(field, mappings, required),
        "toJsonExpr": to_json_expr(field, required),
    })
}

fn synthetic_field(name: &str, source_type: SourceType, required: bool) -> Field {
    Field {
        name: name.to_string(),
        source_type,
        required,
        column_name: crate::naming::to_snake_case(name),
        kotlin_type: String::new(),
        db_domain: String::new(),
        proto_type: String::new(),
        default_value: String::new(),
        random_value: String::new(),
        example: String::new(),
        description: String::new(),
        sql_default: None,
        updatable: false,
        is_array: false,
        relation_entity: None,
    }
}

/// Build the render context for one TypeScript model variant.
///
/// The full model injects the identity fields and, for auditable entities,
/// the audit columns; create/update inputs carry the entity fields only.
pub fn ts_model_context(
    schema: &EntitySchema,
    variant: TsVariant,
    mappings: &TypeMappings,
) -> Value {
    let mut fields: Vec<Value> = Vec::new();

    if variant == TsVariant::Model {
        fields.push(ts_field(&synthetic_field("id", SourceType::Long, true), mappings, false));
        fields.push(ts_field(&synthetic_field("uuid", SourceType::Uuid, true), mappings, false));
    }

    let force_optional = variant == TsVariant::Update;
    for field in &schema.fields {
        fields.push(ts_field(field, mappings, force_optional));
    }

    if variant == TsVariant::Model && schema.auditable {
        for (name, ty) in [
            ("createdDate", SourceType::Instant),
            ("createdBy", SourceType::String),
            ("updatedDate", SourceType::Instant),
            ("updatedBy", SourceType::String),
        ] {
            fields.push(ts_field(&synthetic_field(name, ty, false), mappings, false));
        }
    }

    json!({
        "variant": variant.as_str(),
        "className": variant.class_name(&schema.name),
        "entityName": schema.name,
        "fields": fields,
    })
}

/// Build the render context for the fetch-based API client.
pub fn api_client_context(schema: &EntitySchema) -> Value {
    json!({
        "entityName": schema.name,
        "entityNameLower": schema.name_lower(),
        "entityNameLowerPlural": schema.name_lower_plural(),
        "basePath": format!("/api/{}", schema.base_path()),
    })
}

/// Render one TypeScript model variant and write it to `output_path`.
pub fn write_ts_model(
    renderer: &Renderer,
    schema: &EntitySchema,
    variant: TsVariant,
    mappings: &TypeMappings,
    output_path: &Path,
) -> anyhow::Result<()> {
    let context = ts_model_context(schema, variant, mappings);
    let content = renderer.render("typescript/model_class.ts.j2", &context)?;
    write_output(output_path, &content)
}

/// Render the API client and write it to `output_path`.
pub fn write_api_client(
    renderer: &Renderer,
    schema: &EntitySchema,
    output_path: &Path,
) -> anyhow::Result<()> {
    let context = api_client_context(schema);
    let content = renderer.render("typescript/api_client.ts.j2", &context)?;
    write_output(output_path, &content)
}
