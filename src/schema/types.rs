use crate::naming::{pluralize, to_camel_case, to_snake_case};
use serde::{Deserialize, Serialize};

/// Source-type vocabulary of the input documents (JDL-style type names).
///
/// This is a closed enumeration: every field in a document resolves to one
/// of these. Unrecognized type names fall back to [`SourceType::String`] at
/// the extraction boundary rather than failing — a deliberate leniency
/// policy carried through the whole pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SourceType {
    String,
    Integer,
    Long,
    Boolean,
    Double,
    Float,
    BigDecimal,
    LocalDate,
    LocalDateTime,
    Instant,
    Uuid,
    TextBlob,
}

impl SourceType {
    pub const ALL: [SourceType; 12] = [
        SourceType::String,
        SourceType::Integer,
        SourceType::Long,
        SourceType::Boolean,
        SourceType::Double,
        SourceType::Float,
        SourceType::BigDecimal,
        SourceType::LocalDate,
        SourceType::LocalDateTime,
        SourceType::Instant,
        SourceType::Uuid,
        SourceType::TextBlob,
    ];

    /// Parse a source-type name as it appears in input documents.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "String" => Some(SourceType::String),
            "Integer" | "Int" => Some(SourceType::Integer),
            "Long" | "BigInteger" => Some(SourceType::Long),
            "Boolean" => Some(SourceType::Boolean),
            "Double" => Some(SourceType::Double),
            "Float" => Some(SourceType::Float),
            "BigDecimal" => Some(SourceType::BigDecimal),
            "LocalDate" => Some(SourceType::LocalDate),
            "LocalDateTime" => Some(SourceType::LocalDateTime),
            "Instant" | "ZonedDateTime" => Some(SourceType::Instant),
            "UUID" => Some(SourceType::Uuid),
            "TextBlob" => Some(SourceType::TextBlob),
            _ => None,
        }
    }

    /// Parse with the documented string fallback for unknown names.
    pub fn parse_lenient(name: &str) -> Self {
        Self::parse(name).unwrap_or(SourceType::String)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::String => "String",
            SourceType::Integer => "Integer",
            SourceType::Long => "Long",
            SourceType::Boolean => "Boolean",
            SourceType::Double => "Double",
            SourceType::Float => "Float",
            SourceType::BigDecimal => "BigDecimal",
            SourceType::LocalDate => "LocalDate",
            SourceType::LocalDateTime => "LocalDateTime",
            SourceType::Instant => "Instant",
            SourceType::Uuid => "UUID",
            SourceType::TextBlob => "TextBlob",
        }
    }

    /// Date-like types need `Date` coercion in the TypeScript bindings.
    pub fn is_date_like(&self) -> bool {
        matches!(
            self,
            SourceType::LocalDate | SourceType::LocalDateTime | SourceType::Instant
        )
    }

    /// Numeric types need `Number` coercion in the TypeScript bindings.
    pub fn is_number_like(&self) -> bool {
        matches!(
            self,
            SourceType::Integer
                | SourceType::Long
                | SourceType::Double
                | SourceType::Float
                | SourceType::BigDecimal
        )
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resource-scoping classification controlling ownership and inheritance
/// semantics in the generated persistence layer.
///
/// Unlike source types, this enumeration is strict: a document carrying an
/// unrecognized classification is a configuration error, never a silent
/// pass-through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceScope {
    #[default]
    Unscoped,
    Tenant,
    BusinessUnit,
    User,
}

impl ResourceScope {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "UnscopedResource" => Some(ResourceScope::Unscoped),
            "TenantResource" => Some(ResourceScope::Tenant),
            "BusinessUnitResource" => Some(ResourceScope::BusinessUnit),
            "UserResource" => Some(ResourceScope::User),
            _ => None,
        }
    }

    /// The classification name as written in input documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceScope::Unscoped => "UnscopedResource",
            ResourceScope::Tenant => "TenantResource",
            ResourceScope::BusinessUnit => "BusinessUnitResource",
            ResourceScope::User => "UserResource",
        }
    }

    /// Base class of the generated model resource.
    pub fn resource_base(&self) -> &'static str {
        self.as_str()
    }

    /// Base class of the generated JPA entity.
    pub fn persistable_base(&self) -> &'static str {
        match self {
            ResourceScope::Unscoped => "UnscopedPersistable",
            ResourceScope::Tenant => "TenantPersistable",
            ResourceScope::BusinessUnit => "BusinessUnitPersistable",
            ResourceScope::User => "UserPersistable",
        }
    }

    /// Scope keyword used by the SQL migration templates.
    ///
    /// User resources share the business-unit table inheritance.
    pub fn sql_scope(&self) -> &'static str {
        match self {
            ResourceScope::Unscoped => "unscoped",
            ResourceScope::Tenant => "tenantScoped",
            ResourceScope::BusinessUnit | ResourceScope::User => "businessUnitScoped",
        }
    }

    /// Inherited base table holding the scope's common columns.
    pub fn scope_columns_table(&self) -> &'static str {
        match self {
            ResourceScope::Unscoped => "_common_unscoped_resource_columns",
            ResourceScope::Tenant => "_common_tenant_resource_columns",
            ResourceScope::BusinessUnit | ResourceScope::User => {
                "_common_business_unit_resource_columns"
            }
        }
    }
}

impl std::fmt::Display for ResourceScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One normalized schema attribute.
///
/// Every derived property follows the same precedence: explicit override in
/// the input document, else convention-derived default. Produced once by
/// [`crate::schema::normalize_field`] and consumed read-only by every
/// generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name as authored (camelCase by convention).
    pub name: String,
    pub source_type: SourceType,
    pub required: bool,
    /// Storage column name; snake_case of `name` unless overridden.
    pub column_name: String,
    /// Kotlin type name; mapping-table lookup unless overridden.
    pub kotlin_type: String,
    /// Storage-domain type for migration generation.
    pub db_domain: String,
    /// Protocol Buffer wire type.
    pub proto_type: String,
    /// Fixture expression used by generated test factories.
    pub default_value: String,
    /// Randomized fixture expression used by generated test factories.
    pub random_value: String,
    /// Example literal used in generated schema annotations.
    pub example: String,
    pub description: String,
    /// Explicit column DEFAULT expression, if any.
    pub sql_default: Option<String>,
    pub updatable: bool,
    pub is_array: bool,
    /// Set when the field references another entity schema.
    pub relation_entity: Option<String>,
}

impl Field {
    pub fn is_relation(&self) -> bool {
        self.relation_entity.is_some()
    }
}

/// Index descriptor carried through to the migration generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSpec {
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub unique: bool,
}

/// The normalized description of one generatable entity.
///
/// Constructed fresh per generation run and immutable for its duration;
/// nothing here is ever persisted — the *generated* code persists domain
/// data, not this tool.
#[derive(Debug, Clone)]
pub struct EntitySchema {
    /// Entity name, PascalCase by convention.
    pub name: String,
    /// Kotlin package the entity's modules are rooted in.
    pub package_name: String,
    pub scope: ResourceScope,
    pub auditable: bool,
    pub fields: Vec<Field>,
    pub table_name: String,
    pub view_name: String,
    pub indexes: Vec<IndexSpec>,
    pub description: String,
}

impl EntitySchema {
    pub fn name_lower(&self) -> String {
        to_camel_case(&self.name)
    }

    pub fn name_plural(&self) -> String {
        pluralize(&self.name)
    }

    pub fn name_lower_plural(&self) -> String {
        pluralize(&self.name_lower())
    }

    pub fn name_upper_snake(&self) -> String {
        to_snake_case(&self.name).to_uppercase()
    }

    pub fn name_snake(&self) -> String {
        to_snake_case(&self.name)
    }

    /// REST base path, e.g. `parent-organisations` for `ParentOrganisation`.
    pub fn base_path(&self) -> String {
        to_snake_case(&self.name_plural()).replace('_', "-")
    }

    pub fn sequence_name(&self) -> String {
        format!("{}-sequence", self.table_name)
    }
}

/// Module metadata extracted from the document's `info` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleInfo {
    pub module_name: String,
    pub base_package: String,
    pub group: String,
    pub version: String,
    pub title: String,
}

impl Default for ModuleInfo {
    fn default() -> Self {
        ModuleInfo {
            module_name: "generated-api".to_string(),
            base_package: "com.example".to_string(),
            group: "com.example".to_string(),
            version: "0.1.0".to_string(),
            title: "Generated API".to_string(),
        }
    }
}

/// A fully extracted schema document: module metadata plus the ordered
/// entity schemas to generate.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    pub info: ModuleInfo,
    pub entities: Vec<EntitySchema>,
}
