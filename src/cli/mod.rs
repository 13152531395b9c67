//! Command-line interface for stackgen.
//!
//! The CLI exposes the generation pipeline: `generate` runs the module
//! orchestrator, `resource` runs the data-model generator for one variant,
//! and `validate` lints a schema document. Every command prints one line
//! per generated file on success and exits non-zero with a single error
//! message on any failure.

mod commands;

pub use commands::{run_cli, Cli, Commands, OnlyLayer};
