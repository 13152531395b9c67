//! SQL migration generation.
//!
//! Each entity becomes one migration script: a plain columns table, a main
//! table inheriting the scope's common columns, the uuid alternate key plus
//! declared indexes, scope-specific index extras, and audit triggers.

use crate::render::{write_output, Renderer};
use crate::schema::{EntitySchema, ResourceScope};
use serde_json::{json, Value};
use std::path::Path;

/// Build the render context for the table migration.
pub fn migration_context(schema: &EntitySchema) -> Value {
    let columns: Vec<Value> = schema
        .fields
        .iter()
        .map(|f| {
            json!({
                "name": f.column_name,
                "dataType": f.db_domain,
                "defaultValue": f.sql_default,
            })
        })
        .collect();

    // Scoped tables always inherit the audit columns; the entity's own
    // columns table comes last.
    let inherited = vec![
        schema.scope.scope_columns_table().to_string(),
        "_common_audit_columns".to_string(),
        format!("{}_columns", schema.table_name),
    ];

    let indexes: Vec<Value> = schema
        .indexes
        .iter()
        .map(|idx| {
            json!({
                "name": idx.name,
                "columns": idx.columns,
                "unique": idx.unique,
            })
        })
        .collect();

    json!({
        "name": schema.table_name,
        "NAME": schema.table_name.to_uppercase(),
        "columns": columns,
        "inheritedTables": inherited,
        "indexes": indexes,
        "isPartitioned": false,
        "scope": schema.scope.sql_scope(),
        "tenantIndexes": schema.scope == ResourceScope::Tenant,
        "businessUnitIndexes": matches!(
            schema.scope,
            ResourceScope::BusinessUnit | ResourceScope::User
        ),
        "auditTriggers": true,
    })
}

/// File name of the versioned migration, e.g. `V3__organisation.sql`.
pub fn migration_file_name(version: usize, schema: &EntitySchema) -> String {
    format!("V{version}__{}.sql", schema.table_name)
}

/// Render the migration and write it to `output_path`.
pub fn write_migration(
    renderer: &Renderer,
    schema: &EntitySchema,
    output_path: &Path,
) -> anyhow::Result<()> {
    let context = migration_context(schema);
    let content = renderer.render("sql/table.sql.j2", &context)?;
    write_output(output_path, &content)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::generator::fixtures::organisation_schema;
    use crate::schema::IndexSpec;

    #[test]
    fn test_migration_rendering() {
        let renderer = Renderer::new().unwrap();
        let schema = organisation_schema();
        let rendered = renderer
            .render("sql/table.sql.j2", &migration_context(&schema))
            .unwrap();

        assert!(rendered.contains("CREATE TABLE IF NOT EXISTS organisation_columns ("));
        assert!(rendered.contains("parent_organisation_id t_bigint,"));
        assert!(rendered.contains("effective_timestamp t_datetime\n"));
        assert!(rendered.contains("CREATE TABLE IF NOT EXISTS ORGANISATION ("));
        assert!(rendered.contains("_common_unscoped_resource_columns,"));
        assert!(rendered.contains("CONSTRAINT pk_organisation PRIMARY KEY (id)"));
        assert!(rendered
            .contains("CREATE UNIQUE INDEX IF NOT EXISTS ak_organisation_uuid ON organisation"));
        assert!(rendered.contains("trig_organisation_insert_audit"));
        // Unscoped tables get no tenant index extras.
        assert!(!rendered.contains("idx_organisation_tenant_id"));
    }

    #[test]
    fn test_tenant_scope_extras() {
        let renderer = Renderer::new().unwrap();
        let mut schema = organisation_schema();
        schema.scope = ResourceScope::Tenant;
        schema.indexes.push(IndexSpec {
            name: "parent".to_string(),
            columns: vec!["parent_organisation_id".to_string()],
            unique: false,
        });
        let rendered = renderer
            .render("sql/table.sql.j2", &migration_context(&schema))
            .unwrap();

        assert!(rendered.contains("_common_tenant_resource_columns,"));
        assert!(rendered.contains("idx_organisation_tenant_id"));
        assert!(rendered.contains(
            "INDEX IF NOT EXISTS ak_organisation_parent ON organisation USING btree (parent_organisation_id);"
        ));
    }

    #[test]
    fn test_migration_file_name() {
        let schema = organisation_schema();
        assert_eq!(migration_file_name(1, &schema), "V1__organisation.sql");
    }
}
