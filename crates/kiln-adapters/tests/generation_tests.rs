//! End-to-end: built-in catalog → pipelines → renderer → filesystem.

use std::path::Path;
use std::sync::Arc;

use kiln_adapters::{
    CachingVersionResolver, LocalFilesystem, MemoryFilesystem, ModelFormat, StandardRenderer,
    builtin_catalog, builtin_versions,
};
use kiln_core::application::ApplicationError;
use kiln_core::error::KilnError;
use kiln_core::prelude::*;

fn service() -> GenerationService {
    let resolver = CachingVersionResolver::new(Arc::new(builtin_versions().unwrap()));
    GenerationService::new(
        Arc::new(builtin_catalog().unwrap()),
        ServiceCatalog::builtin(),
        Arc::new(resolver),
    )
}

fn request(deps: &[&str]) -> ProjectDescription {
    ProjectDescription::builder()
        .platform_str("3.2.0")
        .unwrap()
        .artifact("shop")
        .dependencies(deps.iter().copied())
        .build()
        .unwrap()
}

#[test]
fn writes_model_compose_and_connections() {
    let result = service()
        .generate(&request(&["web", "data-jpa", "postgresql", "docker-compose", "testcontainers"]))
        .unwrap();

    let fs = MemoryFilesystem::new();
    let output = OutputService::new(Box::new(StandardRenderer::new()), Box::new(fs.clone()));
    output.write(&result, Path::new("/out/shop"), false).unwrap();

    let compose = fs.read_file(Path::new("/out/shop/compose.yaml")).unwrap();
    assert!(compose.contains("postgres:latest"));
    assert!(compose.contains("POSTGRES_DB: mydatabase"));

    let model = fs.read_file(Path::new("/out/shop/build.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&model).unwrap();
    assert!(json["build"]["dependencies"]["testcontainers-postgresql"].is_object());
    assert!(json["generated_at"].is_string());

    let connections = fs
        .read_file(Path::new("/out/shop/service-connections.json"))
        .unwrap();
    assert!(connections.contains("PostgreSQLContainer"));
}

#[test]
fn compose_file_is_omitted_when_empty() {
    let result = service().generate(&request(&["web"])).unwrap();
    let files = StandardRenderer::new()
        .render(&result, Path::new("/out/web"))
        .unwrap();
    assert!(files.file("build.json").is_some());
    assert!(files.file("compose.yaml").is_none());
    assert!(files.file("service-connections.json").is_none());
}

#[test]
fn reproducible_rendering_is_byte_identical() {
    let renderer = StandardRenderer::new()
        .format(ModelFormat::Yaml)
        .reproducible(true);
    let deps = ["webflux", "data-mongodb", "docker-compose", "session", "lombok"];
    let first = renderer
        .render(&service().generate(&request(&deps)).unwrap(), Path::new("out"))
        .unwrap();
    let second = renderer
        .render(&service().generate(&request(&deps)).unwrap(), Path::new("out"))
        .unwrap();

    let a = first.file("build.yaml").unwrap();
    let b = second.file("build.yaml").unwrap();
    assert_eq!(a.content, b.content);
    assert!(!a.content.contains("request_id"));
    assert_eq!(
        first.file("compose.yaml").unwrap().content,
        second.file("compose.yaml").unwrap().content
    );
}

#[test]
fn existing_output_needs_force() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("shop");
    std::fs::create_dir(&root).unwrap();
    std::fs::write(root.join("stale.txt"), "old").unwrap();

    let result = service().generate(&request(&["web"])).unwrap();
    let output = OutputService::new(Box::new(StandardRenderer::new()), Box::new(LocalFilesystem));

    let err = output.write(&result, &root, false).unwrap_err();
    assert!(matches!(
        err,
        KilnError::Application(ApplicationError::OutputExists { .. })
    ));

    output.write(&result, &root, true).unwrap();
    assert!(root.join("build.json").exists());
    assert!(!root.join("stale.txt").exists());
}

#[test]
fn kotlin_coroutines_follow_managed_versions() {
    let description = ProjectDescription::builder()
        .platform_str("3.1.5")
        .unwrap()
        .language(Language::Kotlin)
        .dependencies(["webflux"])
        .build()
        .unwrap();
    let result = service().generate(&description).unwrap();
    // 3.1.5 does not manage coroutines in the built-in table
    assert_eq!(
        result.build.get_property("kotlin-coroutines.version"),
        Some("1.8.1")
    );
    assert!(result.build.has_dependency("jackson-module-kotlin"));

    let description = ProjectDescription::builder()
        .platform_str("3.2.0")
        .unwrap()
        .language(Language::Kotlin)
        .dependencies(["webflux"])
        .build()
        .unwrap();
    let result = service().generate(&description).unwrap();
    assert!(!result.build.has_property("kotlin-coroutines.version"));
}
