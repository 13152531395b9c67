//! Document loading.
//!
//! YAML and JSON documents are parsed by file extension; `.jdl` documents
//! are handed to the external parser bridge. Either way the result is one
//! [`SchemaDocument`] built fresh for this run.

use super::extract::extract_document;
use super::types::SchemaDocument;
use crate::mappings::TypeMappings;
use anyhow::Context;
use serde_json::Value;
use std::path::Path;

/// Read a YAML or JSON document into a value tree.
pub fn read_value(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read document: {}", path.display()))?;
    let value: Value = if has_extension(path, &["yaml", "yml"]) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display()))?
    };
    Ok(value)
}

/// Load and extract a schema document, dispatching on file extension.
pub fn load_document(path: &Path, mappings: &TypeMappings) -> anyhow::Result<SchemaDocument> {
    if has_extension(path, &["jdl"]) {
        return crate::jdl::load_jdl_document(path, mappings);
    }
    let value = read_value(path)?;
    extract_document(&value, mappings)
        .with_context(|| format!("failed to extract schemas from {}", path.display()))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_extension_dispatch() {
        assert!(has_extension(Path::new("spec.yaml"), &["yaml", "yml"]));
        assert!(has_extension(Path::new("spec.YML"), &["yaml", "yml"]));
        assert!(!has_extension(Path::new("spec.json"), &["yaml", "yml"]));
        assert!(has_extension(Path::new("design.jdl"), &["jdl"]));
    }

    #[test]
    fn test_missing_file_is_error() {
        let mappings = TypeMappings::default();
        let err = load_document(Path::new("/nonexistent/spec.yaml"), &mappings).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read document"));
    }
}
