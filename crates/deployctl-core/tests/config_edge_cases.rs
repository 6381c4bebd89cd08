use std::fs;
use std::path::Path;

use deployctl_core::config::{Config, ConfigError, Profile, ProfileCredentials, ResolvedCredentials};
use serial_test::serial;
use tempfile::TempDir;

fn write(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn missing_file_is_an_empty_config() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_path(&dir.path().join("absent.toml")).unwrap();
    assert!(config.profiles.is_empty());
    assert!(config.default_profile.is_none());
}

#[test]
fn empty_file_is_an_empty_config() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_path(&write(&dir, "")).unwrap();
    assert!(config.profiles.is_empty());
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from_path(&write(&dir, "[profiles.prod\napi_key = ")).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "unexpected error: {err}");
    assert!(err.to_string().starts_with("Invalid config file"));
}

#[test]
fn profile_without_credentials_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "[profiles.broken]\nhost = \"https://api.example.com\"\n");
    assert!(Config::load_from_path(&path).is_err());
}

#[test]
fn unknown_keys_are_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        r#"
theme = "dark"

[profiles.prod]
api_key = "abc"
region_hint = "us-east-1"
"#,
    );

    let config = Config::load_from_path(&path).unwrap();
    assert!(matches!(
        config.profiles["prod"].credentials,
        ProfileCredentials::ApiKey { ref api_key } if api_key == "abc"
    ));
}

#[test]
fn host_defaults_when_omitted() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from_path(&write(&dir, "[profiles.prod]\napi_key = \"abc\"\n")).unwrap();
    assert_eq!(config.profiles["prod"].host, deployctl_core::client::DEFAULT_HOST);
}

#[test]
fn dangling_default_profile_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "default_profile = \"gone\"\n\n[profiles.prod]\napi_key = \"abc\"\n",
    );

    let config = Config::load_from_path(&path).unwrap();
    let err = config.resolve_profile(None).unwrap_err();
    assert!(matches!(err, ConfigError::ProfileNotFound { ref name } if name == "gone"));
}

#[test]
fn save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("config.toml");

    let mut config = Config::default();
    let mut profile = Profile::with_basic_auth("https://ece.local:12443", "admin", None);
    profile.insecure = true;
    profile.timeout_secs = Some(90);
    config.set_profile("ece".to_string(), profile.clone());
    config.default_profile = Some("ece".to_string());
    config.save_to_path(&path).unwrap();

    let loaded = Config::load_from_path(&path).unwrap();
    let (name, reloaded) = loaded.resolve_profile(None).unwrap();
    assert_eq!(name, "ece");
    assert_eq!(reloaded, &profile);
}

#[test]
#[serial]
fn environment_references_resolve_with_the_profile() {
    unsafe {
        std::env::set_var("DEPLOYCTL_EDGE_KEY", "expanded-key");
        std::env::remove_var("DEPLOYCTL_EDGE_HOST");
        std::env::remove_var("DEPLOYCTL_API_KEY");
        std::env::remove_var("DEPLOYCTL_HOST");
    }
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        r#"
[profiles.prod]
host = "${DEPLOYCTL_EDGE_HOST:-https://fallback.example.com}"
api_key = "${DEPLOYCTL_EDGE_KEY}"
"#,
    );

    let config = Config::load_from_path(&path).unwrap();
    let profile = &config.profiles["prod"];
    assert_eq!(profile.resolve_host().unwrap(), "https://fallback.example.com");
    assert_eq!(
        profile.resolve_credentials().unwrap(),
        ResolvedCredentials::ApiKey("expanded-key".to_string())
    );

    unsafe {
        std::env::remove_var("DEPLOYCTL_EDGE_KEY");
    }
}

#[test]
#[serial]
fn environment_references_survive_a_save() {
    unsafe {
        std::env::set_var("DEPLOYCTL_EDGE_SECRET", "s3cr3t-value");
        std::env::remove_var("DEPLOYCTL_API_KEY");
    }
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "[profiles.prod]\napi_key = \"${DEPLOYCTL_EDGE_SECRET}\"\n",
    );

    let mut config = Config::load_from_path(&path).unwrap();
    config.default_profile = Some("prod".to_string());
    config.save_to_path(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("${DEPLOYCTL_EDGE_SECRET}"), "written config: {written}");
    assert!(!written.contains("s3cr3t-value"));

    let reloaded = Config::load_from_path(&path).unwrap();
    let (_, profile) = reloaded.resolve_profile(None).unwrap();
    assert_eq!(
        profile.resolve_credentials().unwrap(),
        ResolvedCredentials::ApiKey("s3cr3t-value".to_string())
    );

    unsafe {
        std::env::remove_var("DEPLOYCTL_EDGE_SECRET");
    }
}

#[test]
#[serial]
fn basic_profile_without_password_needs_the_environment() {
    unsafe {
        std::env::remove_var("DEPLOYCTL_PASS");
        std::env::remove_var("DEPLOYCTL_USER");
    }
    let profile = Profile::with_basic_auth("https://ece.local:12443", "admin", None);
    let err = profile.resolve_credentials().unwrap_err();
    assert!(matches!(err, ConfigError::Credential(_)));

    unsafe {
        std::env::set_var("DEPLOYCTL_PASS", "from-env");
    }
    let resolved = profile.resolve_credentials().unwrap();
    assert_eq!(
        resolved,
        ResolvedCredentials::Basic {
            username: "admin".to_string(),
            password: "from-env".to_string(),
        }
    );
    unsafe {
        std::env::remove_var("DEPLOYCTL_PASS");
    }
}

#[cfg(unix)]
fn running_as_root(path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    fs::metadata(path).map(|m| m.uid() == 0).unwrap_or(false)
}

#[cfg(unix)]
#[test]
fn unwritable_directory_is_a_write_error() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    // root ignores directory permissions
    if running_as_root(dir.path()) {
        return;
    }
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

    let err = Config::default()
        .save_to_path(&locked.join("config.toml"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Write { .. }), "unexpected error: {err}");

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
}
