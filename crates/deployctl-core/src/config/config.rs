//! Profile configuration for the deployments API
//!
//! Configuration is stored in TOML with any number of named profiles, each
//! pointing at one API endpoint with its credentials.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::credential::CredentialStore;
use super::error::{ConfigError, Result};
use crate::client::DEFAULT_HOST;

/// Environment overrides for profile fields
pub const ENV_API_KEY: &str = "DEPLOYCTL_API_KEY";
pub const ENV_HOST: &str = "DEPLOYCTL_HOST";
pub const ENV_USER: &str = "DEPLOYCTL_USER";
pub const ENV_PASS: &str = "DEPLOYCTL_PASS";

/// Main configuration structure
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Config {
    /// Profile used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
    /// Map of profile name -> profile configuration
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

/// One API endpoint and how to authenticate against it
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Profile {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(flatten)]
    pub credentials: ProfileCredentials,
    /// Skip TLS certificate verification
    #[serde(default)]
    pub insecure: bool,
    /// Request timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Stored credentials of a profile
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ProfileCredentials {
    ApiKey {
        api_key: String,
    },
    Basic {
        username: String,
        /// Optional so it can be supplied through the environment
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },
}

/// Credentials after environment and keyring resolution
#[derive(Clone, PartialEq, Eq)]
pub enum ResolvedCredentials {
    ApiKey(String),
    Basic { username: String, password: String },
}

impl std::fmt::Debug for ResolvedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolvedCredentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            ResolvedCredentials::Basic { username, .. } => {
                write!(f, "Basic {{ username: {:?}, password: *** }}", username)
            }
        }
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

impl Profile {
    /// Profile authenticating with an API key
    pub fn with_api_key(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            credentials: ProfileCredentials::ApiKey {
                api_key: api_key.into(),
            },
            insecure: false,
            timeout_secs: None,
        }
    }

    /// Profile authenticating with username and password
    pub fn with_basic_auth(
        host: impl Into<String>,
        username: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            host: host.into(),
            credentials: ProfileCredentials::Basic {
                username: username.into(),
                password,
            },
            insecure: false,
            timeout_secs: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Host with the environment override applied
    pub fn resolve_host(&self) -> Result<String> {
        CredentialStore::new()
            .get_credential(&self.host, Some(ENV_HOST))
            .map_err(|e| ConfigError::Credential(format!("Failed to resolve host: {}", e)))
    }

    /// Credentials with environment overrides and keyring references resolved
    pub fn resolve_credentials(&self) -> Result<ResolvedCredentials> {
        let store = CredentialStore::new();
        match &self.credentials {
            ProfileCredentials::ApiKey { api_key } => {
                let key = store.get_credential(api_key, Some(ENV_API_KEY)).map_err(|e| {
                    ConfigError::Credential(format!("Failed to resolve API key: {}", e))
                })?;
                Ok(ResolvedCredentials::ApiKey(key))
            }
            ProfileCredentials::Basic { username, password } => {
                let username = store.get_credential(username, Some(ENV_USER)).map_err(|e| {
                    ConfigError::Credential(format!("Failed to resolve username: {}", e))
                })?;
                let password = match password {
                    Some(p) => store.get_credential(p, Some(ENV_PASS)).map_err(|e| {
                        ConfigError::Credential(format!("Failed to resolve password: {}", e))
                    })?,
                    None => std::env::var(ENV_PASS).map_err(|_| {
                        ConfigError::Credential(format!(
                            "No password stored for '{}' and {} is not set",
                            username, ENV_PASS
                        ))
                    })?,
                };
                Ok(ResolvedCredentials::Basic { username, password })
            }
        }
    }
}

impl Config {
    /// Resolve the profile name to use
    ///
    /// An explicit name wins, then `default_profile`, then the first
    /// profile in alphabetical order.
    pub fn resolve_profile_name(&self, explicit_profile: Option<&str>) -> Result<String> {
        if let Some(name) = explicit_profile {
            return Ok(name.to_string());
        }
        if let Some(default) = &self.default_profile {
            return Ok(default.clone());
        }
        self.list_profiles()
            .first()
            .map(|(name, _)| name.to_string())
            .ok_or_else(|| ConfigError::NoProfiles {
                suggestion: format!(
                    "Add a profile to {} or set {}.",
                    Self::config_path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|_| "the config file".to_string()),
                    ENV_API_KEY
                ),
            })
    }

    /// Look up the profile to use
    pub fn resolve_profile(&self, explicit_profile: Option<&str>) -> Result<(String, &Profile)> {
        let name = self.resolve_profile_name(explicit_profile)?;
        let profile = self
            .profiles
            .get(&name)
            .ok_or_else(|| ConfigError::ProfileNotFound { name: name.clone() })?;
        Ok((name, profile))
    }

    /// Load configuration from the standard location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path; a missing file is an empty config
    pub fn load_from_path(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Read {
            path: config_path.display().to_string(),
            source: e,
        })?;

        // `${VAR}` references stay as written until credentials are resolved
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content).map_err(|e| ConfigError::Write {
            path: config_path.display().to_string(),
            source: e,
        })?;
        Ok(())
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Remove a profile, clearing the default when it pointed at it
    pub fn remove_profile(&mut self, name: &str) -> Option<Profile> {
        if self.default_profile.as_deref() == Some(name) {
            self.default_profile = None;
        }
        self.profiles.remove(name)
    }

    /// All profiles sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.profiles.iter().collect();
        profiles.sort_by_key(|(name, _)| *name);
        profiles
    }

    /// Platform config file location
    ///
    /// Linux: ~/.config/deployctl/config.toml
    /// macOS: ~/Library/Application Support/io.deployctl.deployctl/config.toml
    /// Windows: %APPDATA%\deployctl\deployctl\config\config.toml
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("io", "deployctl", "deployctl").ok_or(ConfigError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}
