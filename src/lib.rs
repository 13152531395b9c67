//! # stackgen
//!
//! **stackgen** is a schema-driven code generator: given an entity/schema
//! description — an [OpenAPI 3.x](https://spec.openapis.org/oas/v3.0.3)
//! document with vendor extensions, or a JDL domain-model document consumed
//! through an external parser — it renders the source files of a complete
//! multi-layer web-service stack: Kotlin data-model classes, JPA
//! persistence entities, SQL migration scripts, REST controllers, Protocol
//! Buffer service definitions with gRPC stubs, TypeScript client bindings,
//! and test factories.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`schema`]** - typed document model, OpenAPI extraction, field
//!   normalization
//! - **[`mappings`]** - the immutable source-type → target-type mapping
//!   table, with optional TOML overrides
//! - **[`naming`]** - identifier case conversion and pluralization
//! - **[`jdl`]** - bridge to the external JDL parser
//! - **[`linter`]** - schema-document validation
//! - **[`render`]** - deterministic MiniJinja template rendering
//! - **[`generator`]** - atomic generators, layer orchestrators, and the
//!   module orchestrator
//! - **[`cli`]** - the `stackgen-gen` command-line surface
//!
//! ### Generation Flow
//!
//! ```text
//! Document (OpenAPI / JDL)
//!     → schema extraction + field normalization
//!     → per-artifact context building (naming + type mappings)
//!     → template rendering
//!     → filesystem writes (idempotent, overwriting)
//! ```
//!
//! Execution is single-threaded, synchronous, and batch: each run loads its
//! own configuration and document fresh, writes are not transactional, and
//! a failed run leaves a partially regenerated tree that the next run fully
//! overwrites.
//!
//! ## Error Handling
//!
//! Configuration errors (missing required keys, unreadable files, invalid
//! resource scopes), external parser failures, and template errors are
//! fatal and abort the run. Type-lookup misses are deliberately lenient:
//! unknown source types and unmapped wire formats fall back to a generic
//! string-like rendering so a document with exotic types still generates.
//!
//! ## Quick Start
//!
//! ```bash
//! cargo run --bin stackgen-gen -- generate \
//!     --schema openapi.yaml \
//!     --output out
//! ```
//!
//! Programmatic use:
//!
//! ```rust,ignore
//! use stackgen::generator::{generate_module, GenerationScope};
//!
//! let report = generate_module(
//!     "openapi.yaml".as_ref(),
//!     "out".as_ref(),
//!     &GenerationScope::all(),
//! )?;
//! println!("generated {} files", report.total());
//! ```

pub mod cli;
pub mod generator;
pub mod jdl;
pub mod linter;
pub mod mappings;
pub mod naming;
pub mod render;
pub mod schema;

pub use mappings::{MappingEntry, TypeMappings};
pub use schema::{
    load_document, EntitySchema, Field, IndexSpec, ModuleInfo, ResourceScope, SchemaDocument,
    SourceType,
};
