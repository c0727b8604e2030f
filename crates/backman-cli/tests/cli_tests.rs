//! End-to-end tests for the backman binary

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const VCAP: &str = r#"{
    "postgres": [{"name": "db1", "label": "postgres", "plan": "small", "tags": ["sql"]}],
    "unsupported-type": [{"name": "odd", "label": "unsupported-type", "plan": "x"}]
}"#;

/// A backman command isolated from the caller's environment.
fn backman(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("backman").unwrap();
    cmd.env_clear().arg("--root").arg(dir.path());
    cmd
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn config_prints_merged_configuration_with_secrets_masked() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"password": "file-secret", "services": {"db1": {"timeout": 7200000000000}}}"#,
    )
    .unwrap();

    let output = backman(&dir)
        .env("BACKMAN_CONFIG", r#"{"username": "admin"}"#)
        .arg("config")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["username"], "admin");
    assert_eq!(json["log_level"], "info");
    assert_eq!(json["password"], "***");
    assert_eq!(json["services"]["db1"]["timeout"], "2h");
    assert!(!String::from_utf8_lossy(&output.stdout).contains("file-secret"));
}

#[test]
fn services_lists_only_supported_instances() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.json"),
        r#"{"services": {"db1": {"retention": {"days": 10}}}}"#,
    )
    .unwrap();

    let output = backman(&dir)
        .env("VCAP_SERVICES", VCAP)
        .env("BACKMAN_CONFIG", r#"{"services": {"db1": {"schedule": "0 0 3 * * *"}}}"#)
        .arg("services")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    let services = json.as_array().unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["name"], "db1");
    assert_eq!(services[0]["schedule"], "0 0 3 * * *");
    assert_eq!(services[0]["timeout"], "1h");
    assert_eq!(services[0]["retention"]["days"], 10);
    assert_eq!(services[0]["retention"]["files"], 100);
}

#[test]
fn services_filtered_by_unsupported_type_is_empty() {
    let dir = TempDir::new().unwrap();

    let output = backman(&dir)
        .env("VCAP_SERVICES", VCAP)
        .args(["services", "--type", "unsupported-type"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(stdout_json(&output), serde_json::json!([]));
}

#[test]
fn service_lookup_prints_one_descriptor() {
    let dir = TempDir::new().unwrap();

    let output = backman(&dir)
        .env("VCAP_SERVICES", VCAP)
        .args(["service", "postgres", "db1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["plan"], "small");
    assert_eq!(json["tags"], serde_json::json!(["sql"]));
}

#[test]
fn missing_service_is_an_error() {
    let dir = TempDir::new().unwrap();

    backman(&dir)
        .env("VCAP_SERVICES", VCAP)
        .args(["service", "unsupported-type", "odd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("odd"));
}

#[test]
fn services_without_catalog_fails() {
    let dir = TempDir::new().unwrap();

    backman(&dir)
        .arg("services")
        .assert()
        .failure()
        .stderr(predicate::str::contains("VCAP_SERVICES"));
}

#[test]
fn malformed_config_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), "{ nope").unwrap();

    backman(&dir)
        .arg("config")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("config.json"));
}

#[cfg(unix)]
#[test]
fn non_unicode_config_document_is_fatal() {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    let dir = TempDir::new().unwrap();
    let raw = OsString::from_vec(b"{\"username\": \"adm\xffin\"}".to_vec());

    backman(&dir)
        .env("BACKMAN_CONFIG", raw)
        .arg("config")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("BACKMAN_CONFIG"));
}
