//! Bridge to the external JDL parser.
//!
//! JDL documents are not parsed in-process. An external tool (the
//! `jdl-parser` executable, or whatever `STACKGEN_JDL_PARSER` points at) is
//! invoked with `--input <file>` and must print a structured JSON document
//! on stdout. A nonzero exit or malformed output is a fatal pipeline error
//! with the tool's stderr attached — there is no partial recovery.

use crate::mappings::TypeMappings;
use crate::schema::{
    normalize_field, EntitySchema, ModuleInfo, RawField, ResourceScope, SchemaDocument,
};
use crate::naming::{to_camel_case, to_snake_case};
use anyhow::{bail, Context};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use std::process::Command;

/// Environment variable overriding the parser executable.
pub const PARSER_ENV: &str = "STACKGEN_JDL_PARSER";
const DEFAULT_PARSER: &str = "jdl-parser";

/// Parsed JDL document as emitted by the external tool.
#[derive(Debug, Clone, Deserialize)]
pub struct JdlDocument {
    #[serde(default)]
    pub entities: Vec<JdlEntity>,
    #[serde(default)]
    pub applications: Vec<JdlApplication>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JdlEntity {
    pub name: String,
    #[serde(rename = "tableName")]
    pub table_name: Option<String>,
    pub javadoc: Option<String>,
    #[serde(default)]
    pub fields: Vec<JdlField>,
    #[serde(default)]
    pub annotations: Vec<JdlAnnotation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JdlField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub javadoc: Option<String>,
    #[serde(default)]
    pub validations: Vec<JdlValidation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JdlValidation {
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JdlAnnotation {
    #[serde(rename = "optionName")]
    pub option_name: String,
    #[serde(rename = "optionValue", default)]
    pub option_value: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JdlApplication {
    pub name: String,
    #[serde(default)]
    pub config: Value,
    #[serde(default)]
    pub entities: Vec<String>,
}

impl JdlField {
    /// A field is required when it carries a `required` validation without
    /// an explicit `false` value.
    pub fn is_required(&self) -> bool {
        self.validations.iter().any(|v| {
            v.key == "required"
                && match &v.value {
                    Value::Null => true,
                    Value::Bool(b) => *b,
                    Value::String(s) => s == "true",
                    _ => false,
                }
        })
    }
}

impl JdlEntity {
    fn annotation(&self, name: &str) -> Option<&Value> {
        self.annotations
            .iter()
            .find(|a| a.option_name == name)
            .map(|a| &a.option_value)
    }
}

/// Run the external parser and deserialize its stdout.
pub fn run_parser(input: &Path) -> anyhow::Result<JdlDocument> {
    if !input.exists() {
        bail!("JDL file not found: {}", input.display());
    }
    let parser = std::env::var(PARSER_ENV).unwrap_or_else(|_| DEFAULT_PARSER.to_string());
    tracing::debug!(parser = %parser, input = %input.display(), "invoking external JDL parser");

    let output = Command::new(&parser)
        .arg("--input")
        .arg(input)
        .output()
        .with_context(|| format!("failed to launch JDL parser '{parser}'"))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "JDL parsing failed ({}): {}",
            output.status,
            stderr.trim()
        );
    }

    serde_json::from_slice(&output.stdout).with_context(|| {
        format!(
            "JDL parser '{parser}' produced malformed output: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        )
    })
}

/// Load a JDL document through the external parser and convert it to the
/// same [`SchemaDocument`] shape the OpenAPI extractor produces.
pub fn load_jdl_document(path: &Path, mappings: &TypeMappings) -> anyhow::Result<SchemaDocument> {
    let parsed = run_parser(path)?;
    convert_document(&parsed, mappings)
}

/// Convert a parsed JDL document into entity schemas.
pub fn convert_document(
    parsed: &JdlDocument,
    mappings: &TypeMappings,
) -> anyhow::Result<SchemaDocument> {
    let info = module_info(parsed);
    let mut entities = Vec::with_capacity(parsed.entities.len());
    for entity in &parsed.entities {
        entities.push(
            convert_entity(entity, &info.base_package, mappings)
                .with_context(|| format!("failed to convert JDL entity '{}'", entity.name))?,
        );
    }
    Ok(SchemaDocument { info, entities })
}

fn module_info(parsed: &JdlDocument) -> ModuleInfo {
    let defaults = ModuleInfo::default();
    let Some(app) = parsed.applications.first() else {
        return defaults;
    };
    let config_str = |key: &str, default: &str| {
        app.config
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
            .to_string()
    };
    ModuleInfo {
        module_name: config_str("baseName", &app.name),
        base_package: config_str("packageName", &defaults.base_package),
        group: config_str("group", &defaults.group),
        version: config_str("version", &defaults.version),
        title: config_str("baseName", &app.name),
    }
}

fn convert_entity(
    entity: &JdlEntity,
    base_package: &str,
    mappings: &TypeMappings,
) -> anyhow::Result<EntitySchema> {
    let scope = match entity.annotation("resourceType").and_then(Value::as_str) {
        None => ResourceScope::default(),
        Some(raw) => match ResourceScope::parse(raw) {
            Some(scope) => scope,
            None => bail!("invalid resourceType annotation '{raw}'"),
        },
    };

    let mut fields = Vec::with_capacity(entity.fields.len());
    for field in &entity.fields {
        let raw = RawField {
            name: Some(field.name.clone()),
            source_type: Some(field.field_type.clone()),
            required: field.is_required(),
            description: field.javadoc.clone(),
            ..RawField::default()
        };
        fields.push(normalize_field(&raw, mappings)?);
    }

    let table_name = entity
        .table_name
        .clone()
        .unwrap_or_else(|| to_snake_case(&entity.name));

    Ok(EntitySchema {
        name: entity.name.clone(),
        package_name: format!("{base_package}.{}", to_camel_case(&entity.name)),
        scope,
        auditable: entity
            .annotation("auditable")
            .map(|v| !matches!(v, Value::Bool(false)))
            .unwrap_or(false),
        fields,
        view_name: format!("vw_{table_name}"),
        table_name,
        indexes: Vec::new(),
        description: entity.javadoc.clone().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    fn parsed_fixture() -> JdlDocument {
        serde_json::from_value(json!({
            "entities": [{
                "name": "Organisation",
                "javadoc": "An organisation.",
                "fields": [
                    {
                        "name": "parentOrganisationId",
                        "type": "Long",
                        "validations": [{"key": "required"}]
                    },
                    {
                        "name": "notes",
                        "type": "TextBlob",
                        "validations": []
                    }
                ],
                "annotations": [
                    {"optionName": "resourceType", "optionValue": "TenantResource"},
                    {"optionName": "auditable"}
                ]
            }],
            "applications": [{
                "name": "organisations",
                "config": {"baseName": "core-organisation-api", "packageName": "net.blugrid.api.core"},
                "entities": ["Organisation"]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_convert_document() {
        let mappings = TypeMappings::default();
        let doc = convert_document(&parsed_fixture(), &mappings).unwrap();
        assert_eq!(doc.info.module_name, "core-organisation-api");
        assert_eq!(doc.info.base_package, "net.blugrid.api.core");

        let entity = &doc.entities[0];
        assert_eq!(entity.scope, ResourceScope::Tenant);
        assert!(entity.auditable);
        assert_eq!(entity.fields[0].name, "parentOrganisationId");
        assert!(entity.fields[0].required);
        assert!(!entity.fields[1].required);
        assert_eq!(entity.fields[1].kotlin_type, "String");
    }

    #[test]
    fn test_required_detection() {
        let field: JdlField = serde_json::from_value(json!({
            "name": "x", "type": "String",
            "validations": [{"key": "required", "value": "true"}]
        }))
        .unwrap();
        assert!(field.is_required());

        let field: JdlField = serde_json::from_value(json!({
            "name": "x", "type": "String",
            "validations": [{"key": "minlength", "value": 3}]
        }))
        .unwrap();
        assert!(!field.is_required());
    }

    #[test]
    fn test_invalid_scope_annotation_is_error() {
        let mappings = TypeMappings::default();
        let mut parsed = parsed_fixture();
        parsed.entities[0].annotations[0].option_value = json!("CosmicResource");
        assert!(convert_document(&parsed, &mappings).is_err());
    }
}
