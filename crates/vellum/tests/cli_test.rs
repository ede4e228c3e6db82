//! Integration tests for the `vellum` CLI binary.
//!
//! Offline commands run without credentials; lifecycle commands run
//! against a wiremock server passed via `--base-url`.
#![allow(clippy::unwrap_used)]

use std::io::Write;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `vellum` binary with env isolation.
fn vellum_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("vellum");
    cmd.env("HOME", "/tmp/vellum-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/vellum-cli-test-nonexistent")
        .env_remove("VELLUM_API_KEY")
        .env_remove("VELLUM_BASE_URL")
        .env_remove("VELLUM_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

fn document(value: &serde_json::Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "{value}").unwrap();
    file
}

fn index_body() -> serde_json::Value {
    json!({
        "id": "idx-1",
        "created": "2024-01-15T10:30:00Z",
        "label": "Docs",
        "name": "docs",
        "status": "ACTIVE",
        "environment": "DEVELOPMENT"
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = vellum_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    vellum_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("schema")
            .and(predicate::str::contains("apply"))
            .and(predicate::str::contains("import"))
            .and(predicate::str::contains("lookup")),
    );
}

// ── Offline commands ────────────────────────────────────────────────

#[test]
fn test_schema_needs_no_api_key() {
    vellum_cmd().arg("schema").assert().success().stdout(
        predicate::str::contains("vellum_document_index")
            .and(predicate::str::contains("vellum_ml_model"))
            .and(predicate::str::contains("requires_replace")),
    );
}

#[test]
fn test_schema_as_yaml() {
    vellum_cmd()
        .args(["--output", "yaml", "schema"])
        .assert()
        .success()
        .stdout(predicate::str::contains("data_sources:"));
}

#[test]
fn test_validate_accepts_minimal_index() {
    let file = document(&json!({ "name": "docs", "label": "Docs" }));
    vellum_cmd()
        .args(["validate", "vellum_document_index"])
        .arg(file.path())
        .assert()
        .success();
}

#[test]
fn test_validate_rejects_computed_attribute() {
    let file = document(&json!({ "name": "docs", "label": "Docs", "id": "idx-1" }));
    vellum_cmd()
        .args(["validate", "vellum_document_index"])
        .arg(file.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("computed by Vellum"));
}

#[test]
fn test_validate_data_source_with_both_identifiers() {
    let file = document(&json!({ "id": "idx-1", "name": "docs" }));
    vellum_cmd()
        .args(["validate", "--data-source", "vellum_document_index"])
        .arg(file.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("multiple unique identifiers"));
}

#[test]
fn test_unknown_type_is_usage_error() {
    let file = document(&json!({}));
    vellum_cmd()
        .args(["validate", "vellum_prompt"])
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("vellum_document_index"));
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_missing_api_key_is_fatal() {
    let file = document(&json!({ "id": "idx-1", "name": "docs", "label": "Docs" }));
    vellum_cmd()
        .args(["read", "vellum_document_index"])
        .arg(file.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("API key is required"));
}

// ── Lifecycle against a mock server ─────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_import_prints_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/document-indexes/idx-1"))
        .and(header("X_API_KEY", "sk-env"))
        .respond_with(ResponseTemplate::new(200).set_body_json(index_body()))
        .expect(1)
        .mount(&server)
        .await;

    vellum_cmd()
        .env("VELLUM_API_KEY", "sk-env")
        .args(["--base-url", &server.uri(), "--api-key", "sk-flag"])
        .args(["import", "vellum_document_index", "idx-1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"id\": \"idx-1\"")
                .and(predicate::str::contains("\"environment\": \"DEVELOPMENT\"")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_apply_without_state_creates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/document-indexes"))
        .and(header("X_API_KEY", "sk-flag"))
        .respond_with(ResponseTemplate::new(201).set_body_json(index_body()))
        .expect(1)
        .mount(&server)
        .await;

    let plan = document(&json!({ "name": "docs", "label": "Docs", "environment": "DEVELOPMENT" }));
    vellum_cmd()
        .args(["--base-url", &server.uri(), "--api-key", "sk-flag"])
        .args(["apply", "vellum_document_index"])
        .arg(plan.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"ACTIVE\""));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_destroy_ml_model_disables_it() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/v1/ml-models/mdl-1"))
        .and(body_json(json!({ "visibility": "DISABLED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "mdl-1",
            "name": "my-model",
            "visibility": "DISABLED",
            "hosted_by": "FIREWORKS_AI",
            "developed_by": { "value": "META" },
            "family": { "value": "LLAMA3" },
            "exec_config": {
                "model_identifier": "llama-v3-70b",
                "base_url": "https://api.fireworks.ai/inference/v1",
                "metadata": {},
                "features": ["TEXT"]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let state = document(&json!({
        "id": "mdl-1",
        "name": "my-model",
        "visibility": "PUBLIC",
        "hosted_by": "FIREWORKS_AI",
        "developed_by": "META",
        "family": "LLAMA3",
        "exec_config": {
            "model_identifier": "llama-v3-70b",
            "base_url": "https://api.fireworks.ai/inference/v1",
            "features": ["TEXT"]
        }
    }));
    vellum_cmd()
        .args(["--base-url", &server.uri(), "--api-key", "sk-flag"])
        .args(["destroy", "vellum_ml_model"])
        .arg(state.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"state\": null"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_remote_failure_exits_with_diagnostics() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/ml-models/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&server)
        .await;

    vellum_cmd()
        .args(["--base-url", &server.uri(), "--api-key", "sk-flag"])
        .args(["lookup", "vellum_ml_model", "--name", "missing"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("ML model not found: missing"));
}
