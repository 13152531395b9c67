//! Module-root build and config file generation.
//!
//! Every generated Kotlin module gets a `build.gradle.kts` and a
//! `gradle.properties`; the REST module additionally gets the Micronaut
//! `Application.kt` entry point. The plugin and dependency blocks vary by
//! which framework concerns the module carries.

use crate::render::{write_output, Renderer};
use crate::schema::ModuleInfo;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Framework concerns of one generated module, driving its build file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModuleFlags {
    pub include_db: bool,
    pub include_web_service: bool,
    pub include_application: bool,
}

/// Build the render context for a module's `build.gradle.kts`.
pub fn build_file_context(
    info: &ModuleInfo,
    flags: ModuleFlags,
    module_dependencies: &[String],
) -> Value {
    json!({
        "version": info.version,
        "group": info.group,
        "includeDb": flags.include_db,
        "includeWebService": flags.include_web_service,
        "includeApplication": flags.include_application,
        "mainClassName": format!("{}.Application", info.base_package),
        "moduleDependencies": module_dependencies,
    })
}

/// Write `build.gradle.kts` and `gradle.properties` at a module root.
pub fn write_module_files(
    renderer: &Renderer,
    info: &ModuleInfo,
    flags: ModuleFlags,
    module_dependencies: &[String],
    module_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let build_file = module_dir.join("build.gradle.kts");
    let context = build_file_context(info, flags, module_dependencies);
    let content = renderer.render("kotlin/build.gradle.kts.j2", &context)?;
    write_output(&build_file, &content)?;

    let properties_file = module_dir.join("gradle.properties");
    let properties_context = json!({
        "version": info.version,
        "group": info.group,
    });
    let content = renderer.render("gradle.properties.j2", &properties_context)?;
    write_output(&properties_file, &content)?;

    Ok(vec![build_file, properties_file])
}

/// Write the Micronaut application entry point for the REST module.
pub fn write_application(
    renderer: &Renderer,
    info: &ModuleInfo,
    output_path: &Path,
) -> anyhow::Result<()> {
    let context = json!({ "packageName": info.base_package });
    let content = renderer.render("kotlin/application.kt.j2", &context)?;
    write_output(output_path, &content)
}
