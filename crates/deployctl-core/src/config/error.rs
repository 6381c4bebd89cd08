//! Errors raised while reading, writing or resolving profiles

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not encode config: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No profiles configured. {suggestion}")]
    NoProfiles { suggestion: String },

    #[error("Failed to resolve credential: {0}")]
    Credential(String),

    #[cfg(feature = "secure-storage")]
    #[error("Keyring error: {0}")]
    Keyring(String),

    #[error("No configuration directory available for this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, ConfigError>;
