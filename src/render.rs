//! Template rendering.
//!
//! All templates are compiled into the binary and registered once in a
//! MiniJinja environment with strict undefined behavior: an unknown
//! template identifier or an unresolvable template variable is a fatal
//! error surfaced to the invoker — the pipeline never emits partially
//! rendered text. Rendering is deterministic: the same template and the
//! same context produce byte-identical output.

use anyhow::Context;
use minijinja::{Environment, UndefinedBehavior};
use serde_json::Value;
use std::fs;
use std::path::Path;

macro_rules! templates {
    ($($name:literal),+ $(,)?) => {
        [$(($name, include_str!(concat!("../templates/", $name)))),+]
    };
}

/// Template identifiers and their embedded sources.
const TEMPLATES: [(&str, &str); 12] = templates![
    "kotlin/resource.kt.j2",
    "kotlin/entity.kt.j2",
    "kotlin/controller.kt.j2",
    "kotlin/grpc_service.kt.j2",
    "kotlin/test_factory.kt.j2",
    "kotlin/application.kt.j2",
    "kotlin/build.gradle.kts.j2",
    "gradle.properties.j2",
    "sql/table.sql.j2",
    "proto/service.proto.j2",
    "typescript/model_class.ts.j2",
    "typescript/api_client.ts.j2",
];

/// The shared rendering environment for one generation run.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> anyhow::Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .with_context(|| format!("failed to register template '{name}'"))?;
        }
        Ok(Renderer { env })
    }

    /// Render a template with the given context map.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown template identifier or an
    /// unresolvable template variable.
    pub fn render(&self, template: &str, context: &Value) -> anyhow::Result<String> {
        let tmpl = self
            .env
            .get_template(template)
            .with_context(|| format!("unknown template '{template}'"))?;
        tmpl.render(context)
            .with_context(|| format!("failed to render template '{template}'"))
    }
}

/// Write generated content to its target path, creating parent directories
/// as needed and overwriting any existing file. No merge, no diff, no
/// rollback.
pub fn write_output(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("✅ Generated: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_templates_register() {
        let renderer = Renderer::new().unwrap();
        for (name, _) in TEMPLATES {
            assert!(renderer.env.get_template(name).is_ok(), "missing template {name}");
        }
    }

    #[test]
    fn test_unknown_template_is_fatal() {
        let renderer = Renderer::new().unwrap();
        assert!(renderer.render("kotlin/nonexistent.j2", &json!({})).is_err());
    }

    #[test]
    fn test_unresolved_variable_is_fatal() {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_template("t", "Hello {{ missing }}!").unwrap();
        let result = env.get_template("t").unwrap().render(json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let renderer = Renderer::new().unwrap();
        let ctx = json!({
            "packageName": "com.example.widget",
            "entityName": "Widget",
            "entityNameLower": "widget",
            "entityNamePlural": "Widgets",
            "entityNameLowerPlural": "widgets",
            "basePath": "widgets",
            "tagName": "Widgets",
            "tagDescription": "Widget management operations",
        });
        let first = renderer.render("kotlin/controller.kt.j2", &ctx).unwrap();
        let second = renderer.render("kotlin/controller.kt.j2", &ctx).unwrap();
        assert_eq!(first, second);
    }
}
