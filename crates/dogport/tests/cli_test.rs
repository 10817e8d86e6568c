//! Integration tests for the `dogport` binary.
//!
//! Argument parsing, help output and completions run offline. The export
//! tests point the binary at a wiremock server standing in for the dog API.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `dogport` binary with env isolation.
///
/// Clears the dog and dogport env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn dogport_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("dogport");
    cmd.env("HOME", "/tmp/dogport-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/dogport-cli-test-nonexistent")
        .env("NO_COLOR", "1")
        .env_remove("DOG_API_ENDPOINT")
        .env_remove("DOG_API_TOKEN")
        .env_remove("DOGPORT_PROFILE")
        .env_remove("DOGPORT_INSECURE")
        .env_remove("DOGPORT_TIMEOUT")
        .env_remove("DOGPORT_DEFAULTS__ON_COLLISION")
        .env_remove("DOGPORT_DEFAULTS__KEEP_GOING")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

fn api_path(suffix: &str) -> String {
    format!("/api/V2/{suffix}")
}

async fn mount_list(server: &MockServer, suffix: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(api_path(suffix)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// A small deployment: one group, two hosts, one zone, one service and a
/// ruleset referring to all three.
async fn mount_deployment(server: &MockServer) {
    mount_list(
        server,
        "groups",
        json!([
            { "id": "all-active", "name": "all-active" },
            { "id": "g1", "name": "web", "profile_name": "web", "profile_version": "latest" }
        ]),
    )
    .await;
    mount_list(
        server,
        "hosts",
        json!([
            { "id": "h1", "name": "web-01", "environment": "qa", "group": "web" },
            { "id": "h2", "name": "db-01", "environment": "qa", "group": "db" }
        ]),
    )
    .await;
    mount_list(server, "links", json!([])).await;
    mount_list(
        server,
        "services",
        json!([
            { "id": "s1", "name": "ssh", "version": 1,
              "services": [{ "protocol": "tcp", "ports": ["22"] }] }
        ]),
    )
    .await;
    mount_list(
        server,
        "zones",
        json!([{ "id": "z1", "name": "office", "ipv4_addresses": ["10.0.0.0/8"] }]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(api_path("rulesets")))
        .and(query_param("names", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "rs1",
            "name": "web",
            "profile_id": "p1",
            "rules": {
                "inbound": [{
                    "action": "ACCEPT",
                    "active": true,
                    "group": "office",
                    "group_type": "ZONE",
                    "service": "ssh",
                    "states": [],
                    "type": "BASIC"
                }],
                "outbound": []
            }
        }])))
        .mount(server)
        .await;
    mount_list(server, "profiles", json!([])).await;
    mount_list(server, "facts", json!([])).await;
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = dogport_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    dogport_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("Terraform")
            .and(predicate::str::contains("export"))
            .and(predicate::str::contains("completions")),
    );
}

#[test]
fn test_version_flag() {
    dogport_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dogport"));
}

#[test]
fn test_invalid_subcommand() {
    dogport_cmd().arg("frobnicate").assert().code(2);
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_for_each_shell() {
    for shell in ["bash", "zsh", "fish"] {
        dogport_cmd()
            .args(["completions", shell])
            .assert()
            .success()
            .stdout(predicate::str::contains("dogport"));
    }
}

// ── Export argument handling ────────────────────────────────────────

#[test]
fn test_export_requires_environment_and_output_dir() {
    let output = dogport_cmd().arg("export").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("--environment"), "{text}");
}

#[test]
fn test_export_rejects_unknown_collision_policy() {
    dogport_cmd()
        .args(["export", "-e", "qa", "-o", "out", "--on-collision", "merge"])
        .assert()
        .code(2);
}

#[test]
fn test_export_without_endpoint_is_a_usage_error() {
    let tmp = tempfile::tempdir().unwrap();
    let output = dogport_cmd()
        .args(["export", "-e", "qa", "-o"])
        .arg(tmp.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(text.contains("No API endpoint"), "{text}");
}

#[test]
fn test_export_without_token_is_an_auth_error() {
    let tmp = tempfile::tempdir().unwrap();
    dogport_cmd()
        .args(["export", "-e", "qa", "--endpoint", "https://dog.invalid", "-o"])
        .arg(tmp.path())
        .assert()
        .code(3);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_path_prints_toml_file() {
    dogport_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_prints_defaults() {
    dogport_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on_collision = \"suffix\""));
}

// ── Export against a mock API ───────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_export_writes_definitions_and_imports() {
    let server = MockServer::start().await;
    mount_deployment(&server).await;
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("terraform");

    dogport_cmd()
        .args(["export", "-e", "qa", "--token", "test-token", "--endpoint"])
        .arg(server.uri())
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Terraform written to"));

    for table in ["group", "host", "link", "service", "zone", "ruleset", "profile", "fact"] {
        assert!(out.join(format!("{table}.tf")).is_file(), "{table}.tf");
        assert!(out.join(format!("{table}_import.tf")).is_file(), "{table}_import.tf");
    }

    let groups = std::fs::read_to_string(out.join("group.tf")).unwrap();
    assert!(groups.contains("resource \"dog_group\" \"web\" {"), "{groups}");
    assert!(groups.contains("provider = dog.qa"), "{groups}");
    assert!(!groups.contains("all-active"), "{groups}");

    let imports = std::fs::read_to_string(out.join("host_import.tf")).unwrap();
    assert!(imports.contains("id = \"h1\""), "{imports}");
    assert!(imports.contains("to = module.dog.dog_host.web-01"), "{imports}");

    let rulesets = std::fs::read_to_string(out.join("ruleset.tf")).unwrap();
    assert!(rulesets.contains("dog_zone.office.id"), "{rulesets}");
    assert!(rulesets.contains("dog_service.ssh.id"), "{rulesets}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_host_prefix_filters_hosts() {
    let server = MockServer::start().await;
    mount_deployment(&server).await;
    let tmp = tempfile::tempdir().unwrap();

    dogport_cmd()
        .args(["-q", "export", "-e", "qa", "--host-prefix", "web", "--token", "t"])
        .arg("--endpoint")
        .arg(server.uri())
        .arg("-o")
        .arg(tmp.path())
        .assert()
        .success();

    let hosts = std::fs::read_to_string(tmp.path().join("host.tf")).unwrap();
    assert!(hosts.contains("web-01"), "{hosts}");
    assert!(!hosts.contains("db-01"), "{hosts}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_rejected_token_exits_with_auth_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .mount(&server)
        .await;
    let tmp = tempfile::tempdir().unwrap();

    let output = dogport_cmd()
        .args(["export", "-e", "qa", "--token", "stale", "--endpoint"])
        .arg(server.uri())
        .arg("-o")
        .arg(tmp.path())
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(3));
    let text = combined_output(&output);
    assert!(text.contains("not attempted"), "{text}");
    assert!(!tmp.path().join("group.tf").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_export_rejects_invalid_environment() {
    let server = MockServer::start().await;
    let tmp = tempfile::tempdir().unwrap();

    dogport_cmd()
        .args(["export", "-e", "q a", "--token", "t", "--endpoint"])
        .arg(server.uri())
        .arg("-o")
        .arg(tmp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("environment"));
}
