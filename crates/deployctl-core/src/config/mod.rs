//! Configuration and profile management
//!
//! - Multiple named profiles, one per API endpoint
//! - Environment variable expansion in config files
//! - Environment overrides for host and credentials
//! - Credentials stored in the OS keyring (`secure-storage` feature)

#[allow(clippy::module_inception)]
pub mod config;
pub mod credential;
pub mod error;

pub use config::{
    Config, ENV_API_KEY, ENV_HOST, ENV_PASS, ENV_USER, Profile, ProfileCredentials,
    ResolvedCredentials,
};
pub use credential::CredentialStore;
pub use error::{ConfigError, Result};
