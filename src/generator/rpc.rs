//! gRPC layer generation: Protocol Buffer service definitions and the
//! Kotlin service stubs that implement them.
//!
//! Field-number assignment mirrors the wire contract downstream consumers
//! already depend on: message fields start at 2 (`uuid` is 1); the update
//! request shifts by two and the response by one to make room for the
//! identity columns. Filter messages get `repeated int64` lists for Long
//! fields and From/To string pairs for LocalDateTime fields, followed by
//! page/size/sort pagination fields.

use crate::render::{write_output, Renderer};
use crate::schema::{EntitySchema, SourceType};
use serde_json::{json, Value};
use std::path::Path;

/// Build the render context for the proto service definition.
pub fn proto_context(schema: &EntitySchema) -> Value {
    let mut fields = Vec::new();
    let mut filter_fields: Vec<Value> = Vec::new();
    let mut field_num = 2; // uuid is 1

    for field in &schema.fields {
        fields.push(json!({
            "name": field.name,
            "protoType": field.proto_type,
            "fieldNumber": field_num,
            "updateFieldNumber": field_num + 2,
            "responseFieldNumber": field_num + 1,
        }));

        match field.source_type {
            SourceType::Long => {
                filter_fields.push(json!({
                    "name": format!("{}s", field.name),
                    "protoType": "repeated int64",
                    "filterFieldNumber": filter_fields.len() + 3,
                }));
            }
            SourceType::LocalDateTime => {
                filter_fields.push(json!({
                    "name": format!("{}From", field.name),
                    "protoType": "string",
                    "filterFieldNumber": filter_fields.len() + 3,
                }));
                filter_fields.push(json!({
                    "name": format!("{}To", field.name),
                    "protoType": "string",
                    "filterFieldNumber": filter_fields.len() + 3,
                }));
            }
            _ => {}
        }

        field_num += 1;
    }

    let filter_base = filter_fields.len() + 3;
    json!({
        "packageName": schema.package_name,
        "entityName": schema.name,
        "entityNameLower": schema.name_lower(),
        "entityNameLowerPlural": schema.name_lower_plural(),
        "fields": fields,
        "filterFields": filter_fields,
        "filterPageFieldNumber": filter_base,
        "filterSizeFieldNumber": filter_base + 1,
        "filterSortFieldNumber": filter_base + 2,
    })
}

/// Build the render context for the Kotlin gRPC service stub.
pub fn grpc_service_context(schema: &EntitySchema) -> Value {
    json!({
        "packageName": schema.package_name,
        "entityName": schema.name,
        "entityNameLower": schema.name_lower(),
    })
}

/// Render the proto definition and write it to `output_path`.
pub fn write_proto(
    renderer: &Renderer,
    schema: &EntitySchema,
    output_path: &Path,
) -> anyhow::Result<()> {
    let context = proto_context(schema);
    let content = renderer.render("proto/service.proto.j2", &context)?;
    write_output(output_path, &content)
}

/// Render the Kotlin gRPC service stub and write it to `output_path`.
pub fn write_grpc_service(
    renderer: &Renderer,
    schema: &EntitySchema,
    output_path: &Path,
) -> anyhow::Result<()> {
    let context = grpc_service_context(schema);
    let content = renderer.render("kotlin/grpc_service.kt.j2", &context)?;
    write_output(output_path, &content)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::generator::fixtures::organisation_schema;

    #[test]
    fn test_field_number_assignment() {
        let schema = organisation_schema();
        let context = proto_context(&schema);

        let fields = context["fields"].as_array().unwrap();
        assert_eq!(fields[0]["fieldNumber"], 2);
        assert_eq!(fields[0]["updateFieldNumber"], 4);
        assert_eq!(fields[0]["responseFieldNumber"], 3);
        assert_eq!(fields[1]["fieldNumber"], 3);

        // Long → repeated int64 list; LocalDateTime → From/To pair.
        let filters = context["filterFields"].as_array().unwrap();
        assert_eq!(filters.len(), 3);
        assert_eq!(filters[0]["name"], "parentOrganisationIds");
        assert_eq!(filters[0]["protoType"], "repeated int64");
        assert_eq!(filters[0]["filterFieldNumber"], 3);
        assert_eq!(filters[1]["name"], "effectiveTimestampFrom");
        assert_eq!(filters[1]["filterFieldNumber"], 4);
        assert_eq!(filters[2]["name"], "effectiveTimestampTo");
        assert_eq!(filters[2]["filterFieldNumber"], 5);

        // Pagination fields follow the filters.
        assert_eq!(context["filterPageFieldNumber"], 6);
        assert_eq!(context["filterSizeFieldNumber"], 7);
        assert_eq!(context["filterSortFieldNumber"], 8);
    }

    #[test]
    fn test_proto_rendering() {
        let renderer = Renderer::new().unwrap();
        let schema = organisation_schema();
        let rendered = renderer
            .render("proto/service.proto.j2", &proto_context(&schema))
            .unwrap();

        assert!(rendered.contains("syntax = \"proto3\";"));
        assert!(rendered.contains("service OrganisationService {"));
        assert!(rendered.contains("int64 parentOrganisationId = 2;"));
        assert!(rendered.contains("string effectiveTimestamp = 3;"));
        assert!(rendered.contains("repeated int64 parentOrganisationIds = 3;"));
        assert!(rendered.contains("repeated OrganisationResponse organisations = 1;"));
    }
}
