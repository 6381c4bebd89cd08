//! Connection management for the deployments API

use std::path::PathBuf;

use deployctl_core::DeploymentApi;
use deployctl_core::config::{
    Config, ENV_API_KEY, ENV_HOST, ENV_PASS, ENV_USER, Profile, ResolvedCredentials,
};
use tracing::{debug, info, trace};

use crate::error::{CliError, Result};

/// User agent string for deployctl HTTP requests
const DEPLOYCTL_USER_AGENT: &str = concat!("deployctl/", env!("CARGO_PKG_VERSION"));

/// Connection manager for creating authenticated clients
#[derive(Debug, Clone)]
pub struct ConnectionManager {
    pub config: Config,
    pub config_path: Option<PathBuf>,
}

impl ConnectionManager {
    pub fn with_config_path(config: Config, config_path: Option<PathBuf>) -> Self {
        Self {
            config,
            config_path,
        }
    }

    /// File the configuration is read from and saved to
    pub fn resolved_config_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::config_path()?),
        }
    }

    /// Save the configuration to the appropriate location
    pub fn save_config(&self) -> Result<()> {
        let path = self.resolved_config_path()?;
        self.config.save_to_path(&path)?;
        debug!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Create an API client
    ///
    /// Without an explicit `--config-file`, a complete set of `DEPLOYCTL_*`
    /// credentials in the environment wins over any profile. With one,
    /// only the profile is consulted.
    pub fn create_client(&self, profile_name: Option<&str>) -> Result<DeploymentApi> {
        trace!("Profile name: {:?}", profile_name);
        let use_env_vars = self.config_path.is_none() && profile_name.is_none();

        if use_env_vars && let Some(api) = Self::client_from_env()? {
            return Ok(api);
        }

        let (name, profile) = self.config.resolve_profile(profile_name)?;
        info!("Using profile: {}", name);
        Self::client_from_profile(profile)
    }

    fn client_from_env() -> Result<Option<DeploymentApi>> {
        let host = std::env::var(ENV_HOST).ok();
        let builder = if let Ok(key) = std::env::var(ENV_API_KEY) {
            info!("Using API key from environment variables");
            DeploymentApi::builder().api_key(key)
        } else if let (Ok(user), Ok(pass)) = (std::env::var(ENV_USER), std::env::var(ENV_PASS)) {
            info!("Using basic auth credentials from environment variables");
            DeploymentApi::builder().basic_auth(user, pass)
        } else {
            return Ok(None);
        };

        let builder = match host {
            Some(host) => builder.host(host),
            None => builder,
        };
        Ok(Some(builder.user_agent(DEPLOYCTL_USER_AGENT).build()?))
    }

    fn client_from_profile(profile: &Profile) -> Result<DeploymentApi> {
        let host = profile.resolve_host()?;
        info!("Connecting to deployments API: {}", host);

        let mut builder = DeploymentApi::builder()
            .host(host)
            .user_agent(DEPLOYCTL_USER_AGENT)
            .insecure(profile.insecure);
        if profile.insecure {
            debug!("SSL certificate verification disabled");
        }
        if let Some(timeout) = profile.timeout() {
            builder = builder.timeout(timeout);
        }

        builder = match profile.resolve_credentials()? {
            ResolvedCredentials::ApiKey(key) => builder.api_key(key),
            ResolvedCredentials::Basic { username, password } => {
                debug!("Username: {}", username);
                builder.basic_auth(username, password)
            }
        };

        builder.build().map_err(CliError::from)
    }
}
