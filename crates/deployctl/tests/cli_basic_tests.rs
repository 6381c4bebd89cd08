use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEPLOYMENT_ID: &str = "f1d329b0fb34470ba8b18361cabdd2bc";

/// Command isolated from the user's config and environment
fn deployctl(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("deployctl").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("DEPLOYCTL_PROFILE")
        .env_remove("DEPLOYCTL_CONFIG_FILE")
        .env_remove("DEPLOYCTL_API_KEY")
        .env_remove("DEPLOYCTL_HOST")
        .env_remove("DEPLOYCTL_USER")
        .env_remove("DEPLOYCTL_PASS")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(home: &TempDir, host: &str) -> std::path::PathBuf {
    let path = home.path().join("deployctl.toml");
    std::fs::write(
        &path,
        format!(
            "default_profile = \"test\"\n\n[profiles.test]\nhost = \"{}\"\napi_key = \"test-key\"\n",
            host
        ),
    )
    .unwrap();
    path
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    deployctl(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("managing cloud deployments"))
        .stdout(predicate::str::contains("EXAMPLES:"));
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    deployctl(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("deployctl"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_args_shows_help() {
    let home = TempDir::new().unwrap();
    deployctl(&home)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn test_invalid_resource_kind() {
    let home = TempDir::new().unwrap();
    deployctl(&home)
        .args(["deployment", "resource", "start", DEPLOYMENT_ID, "--kind", "logstash"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'logstash'"));
}

#[test]
fn test_missing_profile_gives_suggestions() {
    let home = TempDir::new().unwrap();
    deployctl(&home)
        .args(["deployment", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No profile configured"))
        .stderr(predicate::str::contains("deployctl profile set"));
}

#[test]
fn test_invalid_deployment_id_is_rejected_locally() {
    let home = TempDir::new().unwrap();
    // nothing listens here; validation must fail before any request
    let config = write_config(&home, "http://127.0.0.1:9");
    deployctl(&home)
        .arg("--config-file")
        .arg(&config)
        .args(["deployment", "delete", "not-an-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("deployment delete"))
        .stderr(predicate::str::contains("id \"not-an-id\" is invalid"));
}

#[test]
fn test_profile_set_and_list() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("nested").join("deployctl.toml");

    deployctl(&home)
        .arg("--config-file")
        .arg(&config)
        .args(["profile", "set", "prod", "--api-key", "abcdefgh12345"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Profile 'prod' saved."));

    deployctl(&home)
        .arg("--config-file")
        .arg(&config)
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"prod\""))
        .stdout(predicate::str::contains("abcd****"))
        .stdout(predicate::str::contains("abcdefgh12345").not())
        .stdout(predicate::str::contains("\"is_default\": true"));
}

#[test]
fn test_profile_remove_unknown() {
    let home = TempDir::new().unwrap();
    let config = write_config(&home, "https://api.example.com");
    deployctl(&home)
        .arg("--config-file")
        .arg(&config)
        .args(["profile", "remove", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Profile 'missing' not found"));
}

#[tokio::test]
async fn test_get_deployment_through_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/deployments/{}", DEPLOYMENT_ID)))
        .and(query_param("show_plans", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": DEPLOYMENT_ID,
            "name": "search-prod",
            "healthy": true,
            "resources": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let config = write_config(&home, &server.uri());
    let mut cmd = deployctl(&home);
    cmd.arg("--config-file")
        .arg(&config)
        .args(["-o", "yaml", "deployment", "get", DEPLOYMENT_ID, "--show-plans"]);

    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();
    assert
        .success()
        .stdout(predicate::str::contains("name: search-prod"));
}

#[tokio::test]
async fn test_add_note_with_env_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/api/v1/deployments/{}/notes", DEPLOYMENT_ID)))
        .and(body_json(json!({ "message": "rotated keys" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "notes": [{ "id": "1", "message": "rotated keys" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let mut cmd = deployctl(&home);
    cmd.env("DEPLOYCTL_API_KEY", "env-key")
        .env("DEPLOYCTL_HOST", server.uri())
        .args(["deployment", "note", "add", DEPLOYMENT_ID, "rotated keys"]);

    let assert = tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap();
    assert
        .success()
        .stdout(predicate::str::contains("\"message\": \"rotated keys\""));
}
