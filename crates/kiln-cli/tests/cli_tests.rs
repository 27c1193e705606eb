//! End-to-end tests for the `kiln` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `kiln` invocation isolated from the user's config and environment.
fn kiln(dir: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo_bin_cmd!("kiln");
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env_remove("KILN_CONFIG")
        .env_remove("KILN_LOG_FILE")
        .env_remove("RUST_LOG");
    cmd
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_commands() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("services"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_subcommand_is_usage_error() {
    let dir = TempDir::new().unwrap();
    kiln(&dir).arg("bake").assert().code(2);
}

// ── catalog queries ───────────────────────────────────────────────────────────

#[test]
fn list_json_is_parseable() {
    let dir = TempDir::new().unwrap();
    let out = kiln(&dir)
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let ids: Vec<&str> = parsed
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|c| c["id"].as_str())
        .collect();
    assert!(ids.contains(&"web"));
    assert!(ids.contains(&"docker-compose"));
}

#[test]
fn list_filters_by_facet() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["list", "--facet", "reactive", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("webflux"))
        .stdout(predicate::str::is_match("(?m)^web$").unwrap().not());
}

#[test]
fn services_lists_registry() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["services", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("postgres"))
        .stdout(predicate::str::contains("zipkin"));
}

#[test]
fn info_unknown_capability_is_not_found() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["info", "data-jpa"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spring-boot-starter-data-jpa"));
    kiln(&dir)
        .args(["info", "flux-capacitor"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("flux-capacitor"));
}

// ── generate ──────────────────────────────────────────────────────────────────

#[test]
fn generate_writes_model_and_compose() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args([
            "generate",
            "shop",
            "-d",
            "web,data-jpa,postgresql,docker-compose",
            "--reproducible",
        ])
        .assert()
        .success();

    let project = dir.path().join("shop");
    let model = fs::read_to_string(project.join("build.json")).unwrap();
    let model: serde_json::Value = serde_json::from_str(&model).unwrap();
    assert!(model.get("generated_at").is_none());
    assert_eq!(model["request"]["name"], "shop");

    let compose = fs::read_to_string(project.join("compose.yaml")).unwrap();
    assert!(compose.contains("postgres"));
    assert!(!project.join("service-connections.json").exists());
}

#[test]
fn generate_yaml_into_custom_directory() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args([
            "gen",
            "api",
            "-d",
            "webflux,data-mongodb",
            "--build",
            "gradle",
            "--lang",
            "kotlin",
            "--format",
            "yaml",
            "--out",
            "out/api",
        ])
        .assert()
        .success();

    let model = fs::read_to_string(dir.path().join("out/api/build.yaml")).unwrap();
    assert!(model.contains("spring-boot-starter-data-mongodb-reactive"));
    assert!(model.contains("gradle"));
}

#[test]
fn existing_output_needs_force() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("shop")).unwrap();

    kiln(&dir)
        .args(["generate", "shop", "-d", "web"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    kiln(&dir)
        .args(["generate", "shop", "-d", "web", "--force", "--yes"])
        .assert()
        .success();
    assert!(dir.path().join("shop/build.json").exists());
}

#[test]
fn unknown_dependency_writes_nothing() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["generate", "shop", "-d", "web,flux-capacitor"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("flux-capacitor"));
    assert!(!dir.path().join("shop").exists());
}

#[test]
fn incompatible_platform_is_user_error() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["generate", "gw", "-d", "cloud-gateway", "--platform", "3.0.0"])
        .assert()
        .code(2);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["generate", "shop", "-d", "kafka,testcontainers", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("service-connections.json"));
    assert!(!dir.path().join("shop").exists());
}

#[test]
fn json_summary_reports_services() {
    let dir = TempDir::new().unwrap();
    let out = kiln(&dir)
        .args([
            "--output-format",
            "json",
            "generate",
            "shop",
            "-d",
            "data-redis,docker-compose,testcontainers",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let summary: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(summary["written"], true);
    assert_eq!(summary["compose_services"], serde_json::json!(["redis"]));
    assert_eq!(summary["connections"], serde_json::json!(["redis"]));
}

// ── configuration ─────────────────────────────────────────────────────────────

#[test]
fn init_then_set_and_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("kiln.toml");
    let config = config.to_str().unwrap();

    kiln(&dir).args(["--config", config, "init"]).assert().success();
    kiln(&dir)
        .args(["--config", config, "config", "get", "defaults.build_system"])
        .assert()
        .success()
        .stdout("maven\n");

    kiln(&dir)
        .args(["--config", config, "config", "set", "defaults.build_system", "gradle"])
        .assert()
        .success();
    kiln(&dir)
        .args(["--config", config, "config", "get", "defaults.build_system"])
        .assert()
        .success()
        .stdout("gradle\n");
}

#[test]
fn local_config_supplies_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".kiln.toml"),
        "[defaults]\nbuild_system = \"gradle\"\n",
    )
    .unwrap();

    kiln(&dir)
        .args(["config", "get", "defaults.build_system"])
        .assert()
        .success()
        .stdout("gradle\n");
}

#[test]
fn environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .env("KILN_DEFAULTS__LANGUAGE", "kotlin")
        .args(["config", "get", "defaults.language"])
        .assert()
        .success()
        .stdout("kotlin\n");
}

#[test]
fn broken_config_file_exits_with_configuration_code() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("broken.toml");
    fs::write(&config, "[defaults\nplatform_version = ").unwrap();

    kiln(&dir)
        .args(["--config", config.to_str().unwrap(), "list"])
        .assert()
        .code(4);
}

#[test]
fn completions_for_bash() {
    let dir = TempDir::new().unwrap();
    kiln(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kiln"));
}
