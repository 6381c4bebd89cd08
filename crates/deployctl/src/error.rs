//! Error types for deployctl
//!
//! Library errors are folded into [`CliError`] so every failure can be
//! printed with a short list of follow-up suggestions.

use deployctl_core::CoreError;
use deployctl_core::config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profile '{name}' not found")]
    ProfileNotFound { name: String },

    #[error("No profile configured and no DEPLOYCTL_API_KEY or DEPLOYCTL_USER set")]
    NoProfileConfigured,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("API error: {message}")]
    ApiError { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("File error for '{path}': {message}")]
    FileError { path: String, message: String },

    #[error("Connection error: {message}")]
    ConnectionError { message: String },

    #[error("Output formatting error: {message}")]
    OutputError { message: String },
}

pub type Result<T> = std::result::Result<T, CliError>;

impl CliError {
    /// Get helpful suggestions for resolving this error
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            CliError::ProfileNotFound { name } => vec![
                "List available profiles: deployctl profile list".to_string(),
                format!("Create profile '{}': deployctl profile set {} --api-key <key>", name, name),
            ],
            CliError::NoProfileConfigured => vec![
                "Create a profile: deployctl profile set default --api-key <key>".to_string(),
                "Or export DEPLOYCTL_API_KEY (and optionally DEPLOYCTL_HOST)".to_string(),
            ],
            CliError::AuthenticationFailed { .. } => vec![
                "Check your credentials: deployctl profile show <profile>".to_string(),
                "Verify the API key has not expired".to_string(),
            ],
            CliError::ConnectionError { .. } => vec![
                "Check network connectivity".to_string(),
                "Verify the host is correct: deployctl profile show <profile>".to_string(),
            ],
            CliError::ApiError { message } if message.contains("404") => vec![
                "Verify the deployment ID is correct".to_string(),
                "List deployments to find the correct ID: deployctl deployment list".to_string(),
            ],
            CliError::FileError { path, .. } => vec![
                format!("Check that file exists: {}", path),
                "Verify the file contains valid JSON".to_string(),
            ],
            _ => vec![],
        }
    }

    /// Error text followed by suggestions, one per line
    pub fn display_with_suggestions(&self) -> String {
        let mut out = format!("Error: {}", self);
        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\n\nSuggestions:");
            for suggestion in suggestions {
                out.push_str("\n  - ");
                out.push_str(&suggestion);
            }
        }
        out
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        if err.is_validation() {
            return CliError::Validation {
                message: err.to_string(),
            };
        }
        if err.is_unauthorized() {
            return CliError::AuthenticationFailed {
                message: err.to_string(),
            };
        }
        match err {
            CoreError::Transport(e) => CliError::ConnectionError {
                message: e.to_string(),
            },
            CoreError::InvalidInput(message) | CoreError::UnsupportedKind(message) => {
                CliError::InvalidInput { message }
            }
            other => CliError::ApiError {
                message: other.to_string(),
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ProfileNotFound { name } => CliError::ProfileNotFound { name },
            ConfigError::NoProfiles { .. } => CliError::NoProfileConfigured,
            other => CliError::Config(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::OutputError {
            message: format!("JSON error: {}", err),
        }
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::OutputError {
            message: format!("YAML error: {}", err),
        }
    }
}
