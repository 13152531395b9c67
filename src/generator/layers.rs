//! Layer orchestrators.
//!
//! Each function populates one architectural layer for every entity in the
//! document, invoking its atomic generators in a fixed order and returning
//! the generated paths. The sequence is linear and fail-fast: the first
//! generator error aborts the layer, and files already written stay on
//! disk — regeneration is idempotent, so rerunning fully overwrites them.

use crate::mappings::TypeMappings;
use crate::render::Renderer;
use crate::schema::SchemaDocument;
use std::path::{Path, PathBuf};

use super::client::{write_api_client, write_ts_model, TsVariant};
use super::entity::write_entity;
use super::factory::write_test_factory;
use super::model::{write_resource, ResourceVariant};
use super::module_files::{write_application, write_module_files, ModuleFlags};
use super::rest::write_controller;
use super::rpc::{write_grpc_service, write_proto};
use super::sql::{migration_file_name, write_migration};

fn package_dir(base: &Path, package_name: &str) -> PathBuf {
    base.join(package_name.replace('.', "/"))
}

fn module_project(doc: &SchemaDocument, suffix: &str) -> String {
    let module = &doc.info.module_name;
    format!(":{module}:{module}-{suffix}")
}

/// Generate the model layer: all four resource variants per entity.
pub fn generate_model_layer(
    renderer: &Renderer,
    doc: &SchemaDocument,
    mappings: &TypeMappings,
    output_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut generated = Vec::new();
    for entity in &doc.entities {
        let model_dir =
            package_dir(&output_dir.join("src/main/kotlin"), &entity.package_name).join("model");
        for variant in ResourceVariant::ALL {
            let path = model_dir.join(variant.file_name(&entity.name));
            write_resource(renderer, entity, variant, &doc.info.group, mappings, &path)?;
            generated.push(path);
        }
    }
    generated.extend(write_module_files(
        renderer,
        &doc.info,
        ModuleFlags::default(),
        &[],
        output_dir,
    )?);
    Ok(generated)
}

/// Generate the persistence layer: JPA entity and SQL migration per entity.
pub fn generate_db_layer(
    renderer: &Renderer,
    doc: &SchemaDocument,
    mappings: &TypeMappings,
    output_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut generated = Vec::new();
    for (i, entity) in doc.entities.iter().enumerate() {
        let entity_dir = package_dir(&output_dir.join("src/main/kotlin"), &entity.package_name)
            .join("repository/model");
        let entity_file = entity_dir.join(format!("{}Entity.kt", entity.name));
        write_entity(renderer, entity, &doc.info.group, mappings, &entity_file)?;
        generated.push(entity_file);

        let migration_file = output_dir
            .join("src/main/resources/db/migration")
            .join(migration_file_name(i + 1, entity));
        write_migration(renderer, entity, &migration_file)?;
        generated.push(migration_file);
    }
    generated.extend(write_module_files(
        renderer,
        &doc.info,
        ModuleFlags {
            include_db: true,
            ..ModuleFlags::default()
        },
        &[module_project(doc, "model")],
        output_dir,
    )?);
    Ok(generated)
}

/// Generate the REST layer: one controller per entity.
pub fn generate_rest_layer(
    renderer: &Renderer,
    doc: &SchemaDocument,
    output_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut generated = Vec::new();
    for entity in &doc.entities {
        let controller_dir =
            package_dir(&output_dir.join("src/main/kotlin"), &entity.package_name)
                .join("controller");
        let path = controller_dir.join(format!("{}Controller.kt", entity.name));
        write_controller(renderer, entity, &path)?;
        generated.push(path);
    }

    let application_file = package_dir(&output_dir.join("src/main/kotlin"), &doc.info.base_package)
        .join("Application.kt");
    write_application(renderer, &doc.info, &application_file)?;
    generated.push(application_file);

    generated.extend(write_module_files(
        renderer,
        &doc.info,
        ModuleFlags {
            include_db: true,
            include_web_service: true,
            include_application: true,
        },
        &[module_project(doc, "model"), module_project(doc, "db")],
        output_dir,
    )?);
    Ok(generated)
}

/// Generate the RPC layer: proto definition and Kotlin gRPC stub per
/// entity, split across the proto and server modules.
pub fn generate_rpc_layer(
    renderer: &Renderer,
    doc: &SchemaDocument,
    proto_dir: &Path,
    server_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut generated = Vec::new();
    for entity in &doc.entities {
        let proto_file = proto_dir
            .join("src/main/proto")
            .join(format!("{}.proto", entity.name_snake()));
        write_proto(renderer, entity, &proto_file)?;
        generated.push(proto_file);

        let service_file = package_dir(&server_dir.join("src/main/kotlin"), &entity.package_name)
            .join("grpc")
            .join(format!("{}GrpcService.kt", entity.name));
        write_grpc_service(renderer, entity, &service_file)?;
        generated.push(service_file);
    }
    generated.extend(write_module_files(
        renderer,
        &doc.info,
        ModuleFlags::default(),
        &[],
        proto_dir,
    )?);
    generated.extend(write_module_files(
        renderer,
        &doc.info,
        ModuleFlags::default(),
        &[module_project(doc, "model"), module_project(doc, "grpc-proto")],
        server_dir,
    )?);
    Ok(generated)
}

/// Generate the client layer: TypeScript model variants and API client per
/// entity.
pub fn generate_client_layer(
    renderer: &Renderer,
    doc: &SchemaDocument,
    mappings: &TypeMappings,
    output_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut generated = Vec::new();
    for entity in &doc.entities {
        let models_dir = output_dir.join("src/models");
        for variant in [TsVariant::Model, TsVariant::Create, TsVariant::Update] {
            let path = models_dir.join(format!("{}.ts", variant.class_name(&entity.name)));
            write_ts_model(renderer, entity, variant, mappings, &path)?;
            generated.push(path);
        }
        let client_file = output_dir.join("src").join(format!("{}Client.ts", entity.name));
        write_api_client(renderer, entity, &client_file)?;
        generated.push(client_file);
    }
    Ok(generated)
}

/// Generate the test layer: one test factory per entity.
pub fn generate_test_layer(
    renderer: &Renderer,
    doc: &SchemaDocument,
    mappings: &TypeMappings,
    output_dir: &Path,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut generated = Vec::new();
    for entity in &doc.entities {
        let factory_dir =
            package_dir(&output_dir.join("src/main/kotlin"), &entity.package_name).join("factory");
        let path = factory_dir.join(format!("{}TestFactory.kt", entity.name));
        write_test_factory(renderer, entity, &doc.info.group, mappings, &path)?;
        generated.push(path);
    }
    generated.extend(write_module_files(
        renderer,
        &doc.info,
        ModuleFlags::default(),
        &[module_project(doc, "model")],
        output_dir,
    )?);
    Ok(generated)
}
