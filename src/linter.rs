//! # Input Document Linter
//!
//! Validates schema documents before generation runs. Checks the
//! generator's own conventions on top of the plain OpenAPI shape:
//!
//! 1. **Required sections** - `openapi`, `info`, `components.schemas`
//! 2. **Module extensions** - `info.x-base-package` must be present
//! 3. **Resource scoping** - `x-resource-type` must name a classification
//!    from the closed enumeration; unknown values are errors, never a
//!    silent pass-through
//! 4. **Field typing** - properties should carry a `type`; unknown wire
//!    `(type, format)` pairs are reported as info because generation will
//!    fall back to the string source type
//! 5. **Field naming** - properties must have non-empty names

use crate::schema::{read_value, ResourceScope};
use serde_json::Value;
use std::path::Path;

/// Severity level for lint issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintSeverity {
    /// Error - will cause generation to fail
    Error,
    /// Warning - may cause issues but won't block generation
    Warning,
    /// Info - a leniency fallback will apply
    Info,
}

impl std::fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LintSeverity::Error => "ERROR",
            LintSeverity::Warning => "WARN",
            LintSeverity::Info => "INFO",
        };
        write!(f, "{s}")
    }
}

/// A lint issue found in a schema document
#[derive(Debug, Clone)]
pub struct LintIssue {
    /// Where the issue occurred (e.g., "info", "schema:Organisation")
    pub location: String,
    pub severity: LintSeverity,
    /// Issue kind (e.g., "invalid_resource_type", "missing_base_package")
    pub kind: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl LintIssue {
    pub fn new(
        location: impl Into<String>,
        severity: LintSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        LintIssue {
            location: location.into(),
            severity,
            kind: kind.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Lint a schema document file.
pub fn lint_document(path: &Path) -> anyhow::Result<Vec<LintIssue>> {
    let doc = read_value(path)?;
    Ok(lint_value(&doc))
}

/// Lint an already parsed document tree.
pub fn lint_value(doc: &Value) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    if doc.get("openapi").is_none() {
        issues.push(LintIssue::new(
            "document",
            LintSeverity::Error,
            "missing_openapi_version",
            "missing 'openapi' version field",
        ));
    }

    match doc.get("info") {
        None => issues.push(LintIssue::new(
            "document",
            LintSeverity::Error,
            "missing_info",
            "missing 'info' section",
        )),
        Some(info) => {
            if info.get("x-base-package").and_then(Value::as_str).is_none() {
                issues.push(
                    LintIssue::new(
                        "info",
                        LintSeverity::Error,
                        "missing_base_package",
                        "missing 'x-base-package' in info section",
                    )
                    .with_suggestion("add e.g. x-base-package: com.example.api"),
                );
            }
        }
    }

    let schemas = doc
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(Value::as_object);
    let Some(schemas) = schemas else {
        issues.push(LintIssue::new(
            "components",
            LintSeverity::Error,
            "missing_schemas",
            "missing 'components.schemas' section",
        ));
        return issues;
    };

    for (name, schema) in schemas {
        lint_schema(&mut issues, name, schema);
    }
    issues
}

fn lint_schema(issues: &mut Vec<LintIssue>, name: &str, schema: &Value) {
    let location = format!("schema:{name}");

    if let Some(raw) = schema.get("x-resource-type") {
        let valid = raw.as_str().and_then(ResourceScope::parse).is_some();
        if !valid {
            issues.push(
                LintIssue::new(
                    location.clone(),
                    LintSeverity::Error,
                    "invalid_resource_type",
                    format!("invalid x-resource-type '{}'", literal(raw)),
                )
                .with_suggestion(
                    "one of: UnscopedResource, TenantResource, BusinessUnitResource, UserResource",
                ),
            );
        }
    }

    let Some(props) = schema.get("properties").and_then(Value::as_object) else {
        issues.push(LintIssue::new(
            location,
            LintSeverity::Warning,
            "missing_properties",
            "schema defines no properties",
        ));
        return;
    };

    for (prop_name, prop) in props {
        let prop_location = format!("{location}/{prop_name}");
        if prop_name.is_empty() {
            issues.push(LintIssue::new(
                prop_location,
                LintSeverity::Error,
                "missing_field_name",
                "property has an empty name",
            ));
            continue;
        }
        if prop.get("x-generated").and_then(Value::as_bool).unwrap_or(false) {
            continue;
        }
        if prop.get("$ref").is_some() || prop.get("x-source-type").is_some() {
            continue;
        }
        match prop.get("type").and_then(Value::as_str) {
            None => issues.push(LintIssue::new(
                prop_location,
                LintSeverity::Warning,
                "missing_type",
                "property has no 'type'; generation will treat it as a string",
            )),
            Some(wire) if !KNOWN_WIRE_TYPES.contains(&wire) => issues.push(LintIssue::new(
                prop_location,
                LintSeverity::Info,
                "unknown_wire_type",
                format!("unknown wire type '{wire}'; falling back to the string source type"),
            )),
            Some(_) => {}
        }
    }
}

const KNOWN_WIRE_TYPES: [&str; 6] = ["string", "integer", "number", "boolean", "array", "object"];

fn literal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Print issues in the standard one-line format.
pub fn print_lint_issues(issues: &[LintIssue]) {
    for issue in issues {
        match &issue.suggestion {
            Some(suggestion) => println!(
                "[{}] {}: {} ({})",
                issue.severity, issue.location, issue.message, suggestion
            ),
            None => println!("[{}] {}: {}", issue.severity, issue.location, issue.message),
        }
    }
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[LintIssue]) -> bool {
    issues.iter().any(|i| i.severity == LintSeverity::Error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_document_passes() {
        let doc = json!({
            "openapi": "3.0.3",
            "info": {"title": "t", "x-base-package": "com.example"},
            "components": {"schemas": {
                "Widget": {
                    "x-resource-type": "TenantResource",
                    "properties": {"label": {"type": "string"}}
                }
            }}
        });
        let issues = lint_value(&doc);
        assert!(!has_errors(&issues), "unexpected issues: {issues:?}");
    }

    #[test]
    fn test_invalid_resource_type_reported() {
        let doc = json!({
            "openapi": "3.0.3",
            "info": {"title": "t", "x-base-package": "com.example"},
            "components": {"schemas": {
                "Widget": {"x-resource-type": "GalacticResource", "properties": {}}
            }}
        });
        let issues = lint_value(&doc);
        assert!(has_errors(&issues));
        assert!(issues.iter().any(|i| i.kind == "invalid_resource_type"));
    }

    #[test]
    fn test_missing_base_package_reported() {
        let doc = json!({
            "openapi": "3.0.3",
            "info": {"title": "t"},
            "components": {"schemas": {}}
        });
        let issues = lint_value(&doc);
        assert!(issues.iter().any(|i| i.kind == "missing_base_package"));
    }

    #[test]
    fn test_unknown_wire_type_is_info_only() {
        let doc = json!({
            "openapi": "3.0.3",
            "info": {"title": "t", "x-base-package": "com.example"},
            "components": {"schemas": {
                "Widget": {"properties": {"odd": {"type": "matrix"}}}
            }}
        });
        let issues = lint_value(&doc);
        assert!(!has_errors(&issues));
        assert!(issues
            .iter()
            .any(|i| i.kind == "unknown_wire_type" && i.severity == LintSeverity::Info));
    }
}
