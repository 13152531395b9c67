//! Schema document model: typed entity/field records, extraction from
//! OpenAPI-style documents, and field normalization.

mod extract;
mod load;
mod normalize;
mod types;

pub use extract::{extract_document, extract_module_info, map_wire_type};
pub use load::{load_document, read_value};
pub use normalize::{normalize_field, RawField};
pub use types::{
    EntitySchema, Field, IndexSpec, ModuleInfo, ResourceScope, SchemaDocument, SourceType,
};
