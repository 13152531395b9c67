//! # Generator Module
//!
//! Code generation for stackgen: turns a normalized schema document into a
//! complete multi-layer module tree.
//!
//! ## Architecture
//!
//! ```text
//! Schema Document → Type Mapping + Normalization → Context Building → Template Rendering → Generated Files
//! ```
//!
//! Atomic generators (one per artifact) each build a render context from an
//! [`crate::schema::EntitySchema`] plus the [`crate::mappings::TypeMappings`]
//! table and render one template. Layer orchestrators run groups of atomic
//! generators in a fixed order for every entity; the module orchestrator
//! runs every layer. There is no dependency graph, no parallelism and no
//! partial-failure isolation — the first error aborts the run, and the
//! idempotence of regeneration stands in for rollback.
//!
//! ## Generated Structure
//!
//! ```text
//! output/{module}/
//! ├── {module}-model/        # resource DTOs (model, create, update, interface)
//! ├── {module}-db/           # JPA entities + SQL migrations
//! ├── {module}-api/          # REST controllers
//! ├── {module}-grpc-proto/   # Protocol Buffer service definitions
//! ├── {module}-grpc/         # Kotlin gRPC service stubs
//! ├── {module}-ts/           # TypeScript models + API clients
//! └── {module}-test/         # test factories
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stackgen::generator::{generate_module, GenerationScope};
//!
//! let report = generate_module(
//!     "openapi.yaml".as_ref(),
//!     "out".as_ref(),
//!     &GenerationScope::all(),
//! )?;
//! println!("{} files", report.total());
//! ```

mod client;
mod entity;
mod factory;
mod layers;
mod model;
mod module_files;
mod project;
mod rest;
mod rpc;
mod sql;

pub use client::*;
pub use entity::*;
pub use factory::*;
pub use layers::*;
pub use model::*;
pub use module_files::*;
pub use project::*;
pub use rest::*;
pub use rpc::*;
pub use sql::*;

#[cfg(test)]
pub(crate) mod fixtures {
    #![allow(clippy::unwrap_used)]

    use crate::mappings::TypeMappings;
    use crate::schema::{normalize_field, EntitySchema, RawField, ResourceScope};

    /// The Organisation entity used across generator tests.
    pub(crate) fn organisation_schema() -> EntitySchema {
        let mappings = TypeMappings::default();
        let fields = [
            ("parentOrganisationId", "Long", true),
            ("effectiveTimestamp", "LocalDateTime", true),
        ]
        .iter()
        .map(|(name, ty, required)| {
            normalize_field(
                &RawField {
                    name: Some((*name).to_string()),
                    source_type: Some((*ty).to_string()),
                    required: *required,
                    ..RawField::default()
                },
                &mappings,
            )
            .unwrap()
        })
        .collect();
        EntitySchema {
            name: "Organisation".to_string(),
            package_name: "net.blugrid.api.core.organisation".to_string(),
            scope: ResourceScope::Unscoped,
            auditable: true,
            fields,
            table_name: "organisation".to_string(),
            view_name: "vw_organisation".to_string(),
            indexes: Vec::new(),
            description: String::new(),
        }
    }
}
