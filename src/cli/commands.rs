use crate::generator::{
    generate_module, print_summary, write_resource, GenerationScope, ResourceVariant,
};
use crate::linter::{has_errors, lint_document, print_lint_issues};
use crate::mappings::TypeMappings;
use crate::render::Renderer;
use crate::schema::load_document;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line interface for stackgen
///
/// Provides commands for generating module trees from schema documents and
/// validating the documents themselves.
#[derive(Parser)]
#[command(name = "stackgen")]
#[command(about = "stackgen CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for stackgen
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a complete module from a schema document
    Generate {
        /// Path to the schema document (OpenAPI YAML/JSON, or JDL)
        #[arg(short, long)]
        schema: PathBuf,

        /// Output directory for the generated module tree
        #[arg(short, long)]
        output: PathBuf,

        /// Limit regeneration to specific layers (comma-separated or repeated)
        #[arg(long, value_enum, num_args = 1.., value_delimiter = ',')]
        only: Option<Vec<OnlyLayer>>,
    },
    /// Generate one resource variant for every entity in a document
    Resource {
        /// Path to the schema document (OpenAPI YAML/JSON, or JDL)
        #[arg(short, long)]
        schema: PathBuf,

        /// Resource variant to generate
        #[arg(short, long, value_enum)]
        variant: ResourceVariant,

        /// Output directory for the generated files
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Validate a schema document
    ///
    /// Checks the document for the generator's conventions:
    /// - required sections and module extensions
    /// - resource-scoping classifications against the closed enumeration
    /// - field typing (unknown wire types are reported, then tolerated)
    Validate {
        /// Path to the schema document (YAML or JSON)
        #[arg(short, long)]
        schema: PathBuf,

        /// Show only errors (hide warnings and info)
        #[arg(long, default_value_t = false)]
        errors_only: bool,
    },
}

/// Layers that can be selectively regenerated with `--only`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OnlyLayer {
    /// Resource DTOs (model, create, update, interface)
    Model,
    /// JPA entities and SQL migrations
    Db,
    /// REST controllers
    Rest,
    /// Protocol Buffer definitions and gRPC stubs
    Rpc,
    /// TypeScript models and API clients
    Client,
    /// Test factories
    Test,
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - The schema document cannot be loaded or parsed
/// - The external JDL parser fails
/// - Code generation fails
/// - Validation finds errors
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Generate {
            schema,
            output,
            only,
        } => {
            let scope = map_only_to_scope(only.as_deref());
            let report = generate_module(schema, output, &scope)?;
            print_summary(&report);
            Ok(())
        }
        Commands::Resource {
            schema,
            variant,
            output,
        } => {
            let mappings = TypeMappings::for_document(schema)?;
            let doc = load_document(schema, &mappings)?;
            let renderer = Renderer::new()?;
            for entity in &doc.entities {
                let path = output.join(variant.file_name(&entity.name));
                write_resource(&renderer, entity, *variant, &doc.info.group, &mappings, &path)?;
            }
            Ok(())
        }
        Commands::Validate {
            schema,
            errors_only,
        } => {
            let issues = lint_document(schema)?;
            if *errors_only {
                let errors: Vec<_> = issues
                    .iter()
                    .filter(|i| i.severity == crate::linter::LintSeverity::Error)
                    .cloned()
                    .collect();
                print_lint_issues(&errors);
            } else {
                print_lint_issues(&issues);
            }
            if has_errors(&issues) {
                anyhow::bail!("schema document failed validation");
            }
            println!("Schema document is valid");
            Ok(())
        }
    }
}

/// Convert CLI `--only` layers to a `GenerationScope` configuration
///
/// If `only` is `None`, all layers are enabled. If `only` is provided,
/// only the specified layers are enabled.
fn map_only_to_scope(only: Option<&[OnlyLayer]>) -> GenerationScope {
    let mut scope = GenerationScope::all();
    if let Some(layers) = only {
        // Start with nothing, then enable selected layers
        scope = GenerationScope::none();
        for layer in layers {
            match layer {
                OnlyLayer::Model => scope.model = true,
                OnlyLayer::Db => scope.db = true,
                OnlyLayer::Rest => scope.rest = true,
                OnlyLayer::Rpc => scope.rpc = true,
                OnlyLayer::Client => scope.client = true,
                OnlyLayer::Test => scope.test = true,
            }
        }
    }
    scope
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn test_map_only_to_scope_default_is_all() {
        let scope = map_only_to_scope(None);
        assert_eq!(scope, GenerationScope::all());
    }

    #[test]
    fn test_map_only_to_scope_selected() {
        let scope = map_only_to_scope(Some(&[OnlyLayer::Model, OnlyLayer::Db]));
        assert!(scope.model);
        assert!(scope.db);
        assert!(!scope.rest);
        assert!(!scope.rpc);
        assert!(!scope.client);
        assert!(!scope.test);
    }

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "stackgen",
            "generate",
            "--schema",
            "api.yaml",
            "--output",
            "out",
            "--only",
            "model,db",
        ])
        .expect("valid args");
        match cli.command {
            Commands::Generate { only, .. } => {
                assert_eq!(only, Some(vec![OnlyLayer::Model, OnlyLayer::Db]));
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_resource_variant() {
        let cli = Cli::try_parse_from([
            "stackgen",
            "resource",
            "-s",
            "api.yaml",
            "-v",
            "create",
            "-o",
            "out",
        ])
        .expect("valid args");
        match cli.command {
            Commands::Resource { variant, .. } => assert_eq!(variant, ResourceVariant::Create),
            _ => panic!("expected resource command"),
        }
    }
}
