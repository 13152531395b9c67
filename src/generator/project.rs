//! Module orchestrator.
//!
//! Runs every layer orchestrator in a fixed order for one schema document
//! and reports generated file counts. The sequence is non-resumable: the
//! first error aborts the run without rolling back files already written.
//! Outputs are idempotent and fully regenerable, which is the recovery
//! mechanism for a partially-written tree.

use crate::mappings::TypeMappings;
use crate::render::Renderer;
use crate::schema::load_document;
use anyhow::Context;
use std::path::{Path, PathBuf};

use super::layers::{
    generate_client_layer, generate_db_layer, generate_model_layer, generate_rest_layer,
    generate_rpc_layer, generate_test_layer,
};

/// Which layers a generation run produces.
///
/// Used with the CLI `--only` flag to limit regeneration to specific
/// layers; the default is everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationScope {
    pub model: bool,
    pub db: bool,
    pub rest: bool,
    pub rpc: bool,
    pub client: bool,
    pub test: bool,
}

impl GenerationScope {
    pub fn all() -> Self {
        GenerationScope {
            model: true,
            db: true,
            rest: true,
            rpc: true,
            client: true,
            test: true,
        }
    }

    pub fn none() -> Self {
        GenerationScope {
            model: false,
            db: false,
            rest: false,
            rpc: false,
            client: false,
            test: false,
        }
    }
}

impl Default for GenerationScope {
    fn default() -> Self {
        Self::all()
    }
}

/// Files generated per layer, in generation order.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub layers: Vec<(&'static str, Vec<PathBuf>)>,
}

impl GenerationReport {
    pub fn total(&self) -> usize {
        self.layers.iter().map(|(_, files)| files.len()).sum()
    }

    pub fn files_for(&self, layer: &str) -> &[PathBuf] {
        self.layers
            .iter()
            .find(|(name, _)| *name == layer)
            .map(|(_, files)| files.as_slice())
            .unwrap_or(&[])
    }
}

/// Generate a complete module from a schema document.
///
/// Loads the document (dispatching `.jdl` input to the external parser),
/// builds the mapping table with any overrides found beside the document,
/// and runs all enabled layers in fixed order into the conventional module
/// tree under `output_dir`.
pub fn generate_module(
    schema_path: &Path,
    output_dir: &Path,
    scope: &GenerationScope,
) -> anyhow::Result<GenerationReport> {
    let mappings = TypeMappings::for_document(schema_path)?;
    let doc = load_document(schema_path, &mappings)?;
    let renderer = Renderer::new()?;

    let module_name = &doc.info.module_name;
    println!("Generating module: {module_name}");
    println!("Base package: {}", doc.info.base_package);
    println!("Version: {}", doc.info.version);

    let module_dir = output_dir.join(module_name);
    let mut report = GenerationReport::default();

    if scope.model {
        tracing::info!(module = %module_name, "generating model layer");
        let dir = module_dir.join(format!("{module_name}-model"));
        let files = generate_model_layer(&renderer, &doc, &mappings, &dir)
            .context("failed to generate model layer")?;
        report.layers.push(("model", files));
    }
    if scope.db {
        tracing::info!(module = %module_name, "generating db layer");
        let dir = module_dir.join(format!("{module_name}-db"));
        let files = generate_db_layer(&renderer, &doc, &mappings, &dir)
            .context("failed to generate db layer")?;
        report.layers.push(("db", files));
    }
    if scope.rest {
        tracing::info!(module = %module_name, "generating rest layer");
        let dir = module_dir.join(format!("{module_name}-api"));
        let files = generate_rest_layer(&renderer, &doc, &dir)
            .context("failed to generate rest layer")?;
        report.layers.push(("rest", files));
    }
    if scope.rpc {
        tracing::info!(module = %module_name, "generating rpc layer");
        let proto_dir = module_dir.join(format!("{module_name}-grpc-proto"));
        let server_dir = module_dir.join(format!("{module_name}-grpc"));
        let files = generate_rpc_layer(&renderer, &doc, &proto_dir, &server_dir)
            .context("failed to generate rpc layer")?;
        report.layers.push(("rpc", files));
    }
    if scope.client {
        tracing::info!(module = %module_name, "generating client layer");
        let dir = module_dir.join(format!("{module_name}-ts"));
        let files = generate_client_layer(&renderer, &doc, &mappings, &dir)
            .context("failed to generate client layer")?;
        report.layers.push(("client", files));
    }
    if scope.test {
        tracing::info!(module = %module_name, "generating test layer");
        let dir = module_dir.join(format!("{module_name}-test"));
        let files = generate_test_layer(&renderer, &doc, &mappings, &dir)
            .context("failed to generate test layer")?;
        report.layers.push(("test", files));
    }

    Ok(report)
}

/// Print the per-layer and total file counts for a completed run.
pub fn print_summary(report: &GenerationReport) {
    println!("Generation complete");
    println!("Generated files by layer:");
    for (layer, files) in &report.layers {
        println!("  {layer} layer: {} files", files.len());
    }
    println!("Total: {} files", report.total());
}
