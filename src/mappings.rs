//! Static type-mapping configuration for the generation pipeline.
//!
//! One [`TypeMappings`] value is built at process start — compiled-in
//! defaults, optionally overlaid by a `stackgen-mappings.toml` file found
//! alongside the input document — and passed by reference into every
//! component that needs it. It is read-only for the duration of a run; there
//! is no hidden global state.
//!
//! Lookups never fail. An unknown source type resolves to the string-like
//! fallback (`String` / `t_text` / `string`). That leniency is a deliberate
//! policy of the pipeline, not a defect: callers may treat an unresolved
//! type as a latent correctness bug, but generation proceeds.

use crate::schema::SourceType;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// Per-target renderings for one source type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Kotlin type name.
    pub kotlin_type: String,
    /// Storage-domain type used by migration generation.
    pub db_domain: String,
    /// Protocol Buffer wire type.
    pub proto_type: String,
    /// TypeScript type name.
    pub ts_type: String,
    /// Fixture expression for generated test factories.
    pub default_value: String,
    /// Randomized fixture expression for generated test factories.
    pub random_value: String,
    /// Example literal for generated schema annotations.
    pub example: String,
}

/// Partial override for one mapping entry, loaded from
/// `stackgen-mappings.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingPatch {
    pub kotlin_type: Option<String>,
    pub db_domain: Option<String>,
    pub proto_type: Option<String>,
    pub ts_type: Option<String>,
    pub default_value: Option<String>,
    pub random_value: Option<String>,
    pub example: Option<String>,
}

/// Override file format: `[types.<SourceType>]` tables plus an optional
/// `[imports]` table keyed by Kotlin type name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MappingOverrides {
    #[serde(default)]
    pub types: HashMap<String, MappingPatch>,
    #[serde(default)]
    pub imports: HashMap<String, String>,
}

/// The immutable type-mapping table.
#[derive(Debug, Clone)]
pub struct TypeMappings {
    entries: BTreeMap<SourceType, MappingEntry>,
    imports: BTreeMap<String, String>,
    fallback: MappingEntry,
}

impl Default for TypeMappings {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        let mut insert = |ty: SourceType,
                          kotlin: &str,
                          db: &str,
                          proto: &str,
                          ts: &str,
                          default_value: &str,
                          random_value: &str,
                          example: &str| {
            entries.insert(
                ty,
                MappingEntry {
                    kotlin_type: kotlin.to_string(),
                    db_domain: db.to_string(),
                    proto_type: proto.to_string(),
                    ts_type: ts.to_string(),
                    default_value: default_value.to_string(),
                    random_value: random_value.to_string(),
                    example: example.to_string(),
                },
            );
        };

        insert(
            SourceType::String,
            "String",
            "t_text",
            "string",
            "string",
            "\"test-${java.util.UUID.randomUUID()}\"",
            "\"random-${java.util.UUID.randomUUID()}\"",
            "Example String",
        );
        insert(
            SourceType::Integer,
            "Int",
            "t_int",
            "int32",
            "number",
            "Int.random()",
            "Int.random()",
            "1001",
        );
        insert(
            SourceType::Long,
            "Long",
            "t_bigint",
            "int64",
            "number",
            "Long.random()",
            "Long.random()",
            "1001",
        );
        insert(
            SourceType::Boolean,
            "Boolean",
            "t_boolean",
            "bool",
            "boolean",
            "false",
            "listOf(true, false).random()",
            "true",
        );
        insert(
            SourceType::Double,
            "Double",
            "t_float",
            "double",
            "number",
            "0.0",
            "Double.random()",
            "123.45",
        );
        insert(
            SourceType::Float,
            "Float",
            "t_float",
            "float",
            "number",
            "0.0f",
            "Float.random()",
            "123.45",
        );
        insert(
            SourceType::BigDecimal,
            "BigDecimal",
            "t_money",
            "string",
            "number",
            "java.math.BigDecimal.ZERO",
            "java.math.BigDecimal(Double.random())",
            "123.45",
        );
        insert(
            SourceType::LocalDate,
            "LocalDate",
            "t_date",
            "string",
            "Date",
            "java.time.LocalDate.now()",
            "java.time.LocalDate.now().minusDays(Long.random(1, 365))",
            "2024-08-25",
        );
        insert(
            SourceType::LocalDateTime,
            "LocalDateTime",
            "t_datetime",
            "string",
            "Date",
            "java.time.LocalDateTime.now()",
            "java.time.LocalDateTime.now().minusDays(Long.random(1, 365))",
            "2024-08-25T14:15:22",
        );
        insert(
            SourceType::Instant,
            "Instant",
            "t_timestamp",
            "string",
            "Date",
            "java.time.Instant.now()",
            "java.time.Instant.now().minusSeconds(Long.random(1, 86400))",
            "2024-08-25T14:15:22Z",
        );
        insert(
            SourceType::Uuid,
            "UUID",
            "t_uuid",
            "string",
            "string",
            "java.util.UUID.randomUUID()",
            "java.util.UUID.randomUUID()",
            "123e4567-e89b-12d3-a456-426614174000",
        );
        insert(
            SourceType::TextBlob,
            "String",
            "t_text",
            "string",
            "string",
            "\"test-${java.util.UUID.randomUUID()}\"",
            "\"random-${java.util.UUID.randomUUID()}\"",
            "Example String",
        );

        let mut imports = BTreeMap::new();
        for (kotlin_type, path) in [
            ("UUID", "java.util.UUID"),
            ("LocalDateTime", "java.time.LocalDateTime"),
            ("LocalDate", "java.time.LocalDate"),
            ("Instant", "java.time.Instant"),
            ("BigDecimal", "java.math.BigDecimal"),
        ] {
            imports.insert(kotlin_type.to_string(), path.to_string());
        }

        let fallback = MappingEntry {
            kotlin_type: "String".to_string(),
            db_domain: "t_text".to_string(),
            proto_type: "string".to_string(),
            ts_type: "string".to_string(),
            default_value: "\"test-${java.util.UUID.randomUUID()}\"".to_string(),
            random_value: "\"random-${java.util.UUID.randomUUID()}\"".to_string(),
            example: "Example String".to_string(),
        };

        TypeMappings {
            entries,
            imports,
            fallback,
        }
    }
}

impl TypeMappings {
    /// Build the mapping table for a generation run: defaults plus any
    /// `stackgen-mappings.toml` found next to the input document.
    pub fn for_document(document_path: &Path) -> anyhow::Result<Self> {
        let mut mappings = TypeMappings::default();
        if let Some(config_path) = overrides_path(document_path) {
            if let Some(overrides) = load_overrides(&config_path)? {
                tracing::debug!(config = %config_path.display(), "applying mapping overrides");
                mappings.apply_overrides(overrides)?;
            }
        }
        Ok(mappings)
    }

    /// Entry for a source type, falling back to the string-like rendering.
    pub fn entry(&self, ty: SourceType) -> &MappingEntry {
        self.entries.get(&ty).unwrap_or(&self.fallback)
    }

    pub fn kotlin_type(&self, ty: SourceType) -> &str {
        &self.entry(ty).kotlin_type
    }

    pub fn db_domain(&self, ty: SourceType) -> &str {
        &self.entry(ty).db_domain
    }

    pub fn proto_type(&self, ty: SourceType) -> &str {
        &self.entry(ty).proto_type
    }

    pub fn ts_type(&self, ty: SourceType) -> &str {
        &self.entry(ty).ts_type
    }

    pub fn example(&self, ty: SourceType) -> &str {
        &self.entry(ty).example
    }

    /// Import statement for a Kotlin type, if one is needed.
    pub fn kotlin_import(&self, kotlin_type: &str) -> Option<&str> {
        self.imports.get(kotlin_type).map(String::as_str)
    }

    /// Fixture default for a field.
    ///
    /// Non-required fields with no table entry resolve to `null`; required
    /// fields always get a concrete, type-appropriate placeholder — never
    /// null, never empty.
    pub fn default_value(&self, ty: SourceType, required: bool) -> String {
        match self.entries.get(&ty) {
            Some(entry) => entry.default_value.clone(),
            None if required => self.fallback.default_value.clone(),
            None => "null".to_string(),
        }
    }

    /// Randomized fixture expression for a field.
    pub fn random_value(&self, ty: SourceType) -> String {
        self.entries
            .get(&ty)
            .map(|e| e.random_value.clone())
            .unwrap_or_else(|| self.fallback.random_value.clone())
    }

    fn apply_overrides(&mut self, overrides: MappingOverrides) -> anyhow::Result<()> {
        for (type_name, patch) in overrides.types {
            let ty = SourceType::parse(&type_name)
                .with_context(|| format!("unknown source type in mapping overrides: '{type_name}'"))?;
            let base = self.fallback.clone();
            let entry = self.entries.entry(ty).or_insert(base);
            if let Some(v) = patch.kotlin_type {
                entry.kotlin_type = v;
            }
            if let Some(v) = patch.db_domain {
                entry.db_domain = v;
            }
            if let Some(v) = patch.proto_type {
                entry.proto_type = v;
            }
            if let Some(v) = patch.ts_type {
                entry.ts_type = v;
            }
            if let Some(v) = patch.default_value {
                entry.default_value = v;
            }
            if let Some(v) = patch.random_value {
                entry.random_value = v;
            }
            if let Some(v) = patch.example {
                entry.example = v;
            }
        }
        for (kotlin_type, path) in overrides.imports {
            self.imports.insert(kotlin_type, path);
        }
        Ok(())
    }

    /// Replace the entry table entirely. Test seam for exercising the
    /// lookup-miss policy.
    #[cfg(test)]
    pub(crate) fn with_entries(entries: BTreeMap<SourceType, MappingEntry>) -> Self {
        TypeMappings {
            entries,
            ..TypeMappings::default()
        }
    }
}

/// Path of the override file next to the input document, if the document
/// has a parent directory and the file exists.
fn overrides_path(document_path: &Path) -> Option<PathBuf> {
    let candidate = document_path.parent()?.join("stackgen-mappings.toml");
    candidate.exists().then_some(candidate)
}

/// Load mapping overrides from a TOML file.
///
/// Returns `Ok(None)` if the file does not exist (not an error); a file
/// that exists but fails to parse is a fatal configuration error.
pub fn load_overrides(config_path: &Path) -> anyhow::Result<Option<MappingOverrides>> {
    if !config_path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read mapping overrides: {}", config_path.display()))?;
    let overrides: MappingOverrides = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse mapping overrides: {}", config_path.display()))?;
    Ok(Some(overrides))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_known_lookups() {
        let mappings = TypeMappings::default();
        assert_eq!(mappings.kotlin_type(SourceType::Uuid), "UUID");
        assert_eq!(mappings.db_domain(SourceType::String), "t_text");
        assert_eq!(mappings.proto_type(SourceType::Long), "int64");
        assert_eq!(mappings.kotlin_import("UUID"), Some("java.util.UUID"));
        assert_eq!(mappings.kotlin_import("String"), None);
    }

    #[test]
    fn test_unknown_type_tolerance() {
        // Lookup misses fall back to the string-like rendering by design.
        let mappings = TypeMappings::with_entries(BTreeMap::new());
        assert_eq!(mappings.kotlin_type(SourceType::Long), "String");
        assert_eq!(mappings.db_domain(SourceType::Long), "t_text");
        assert_eq!(mappings.proto_type(SourceType::Long), "string");
    }

    #[test]
    fn test_default_value_policy() {
        let empty = TypeMappings::with_entries(BTreeMap::new());
        // No table entry: non-required → null-equivalent, required → concrete placeholder.
        assert_eq!(empty.default_value(SourceType::Long, false), "null");
        let required = empty.default_value(SourceType::Long, true);
        assert_ne!(required, "null");
        assert!(!required.is_empty());

        let mappings = TypeMappings::default();
        assert_eq!(mappings.default_value(SourceType::Boolean, false), "false");
        assert_eq!(
            mappings.default_value(SourceType::LocalDateTime, true),
            "java.time.LocalDateTime.now()"
        );
    }

    #[test]
    fn test_overrides_apply() {
        let mut mappings = TypeMappings::default();
        let overrides: MappingOverrides = toml::from_str(
            r#"
            [types.BigDecimal]
            db_domain = "t_decimal"

            [imports]
            Money = "org.javamoney.moneta.Money"
            "#,
        )
        .unwrap();
        mappings.apply_overrides(overrides).unwrap();
        assert_eq!(mappings.db_domain(SourceType::BigDecimal), "t_decimal");
        // Untouched entries keep their defaults.
        assert_eq!(mappings.kotlin_type(SourceType::BigDecimal), "BigDecimal");
        assert_eq!(
            mappings.kotlin_import("Money"),
            Some("org.javamoney.moneta.Money")
        );
    }

    #[test]
    fn test_overrides_unknown_type_is_error() {
        let mut mappings = TypeMappings::default();
        let overrides: MappingOverrides = toml::from_str(
            r#"
            [types.Duration]
            kotlin_type = "Duration"
            "#,
        )
        .unwrap();
        assert!(mappings.apply_overrides(overrides).is_err());
    }
}
