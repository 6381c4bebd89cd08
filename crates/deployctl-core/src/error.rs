//! Unified error handling for deployctl-core
//!
//! Every operation returns [`CoreError`]. Validation failures, remote API
//! failures and local semantic errors each get their own variant, with
//! helper predicates to classify them.
//!
//! # Example
//!
//! ```rust
//! use deployctl_core::{CoreError, MultiError, Violation};
//!
//! let mut merr = MultiError::new("deployment get");
//! merr.push(Violation::MissingApi);
//! let err: CoreError = merr.into();
//! assert!(err.is_validation());
//! assert!(err.is_bad_request());
//! ```

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::validate::MultiError;

/// Core error type for deployment operations
#[derive(Error, Debug)]
pub enum CoreError {
    /// One or more parameter preconditions were violated
    #[error(transparent)]
    Validation(#[from] MultiError),

    /// The deployments API replied with a non-2xx status
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The HTTP request could not be sent or its body could not be read
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A response body did not match the expected wire model
    #[error("failed to decode response: {message}")]
    Decode { message: String, body: String },

    /// A resource kind string did not name a known kind
    #[error("unsupported resource kind: \"{0}\"")]
    UnsupportedKind(String),

    /// The deployment has no resource of the requested kind
    #[error("deployment: resource kind {kind} is not available")]
    ResourceKindUnavailable { kind: String },

    /// A version override is not a valid semantic version
    #[error("invalid version \"{version}\": {source}")]
    InvalidVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    /// Client construction or other local input problem
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Returns the HTTP status of an API error, if any
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CoreError::Api(e) => Some(e.status),
            CoreError::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Returns true if this is a "not found" error (404)
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// Returns true if this is an authentication/authorization error (401/403)
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }

    /// Returns true if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| s.is_server_error())
    }

    /// Returns true if this is a conflict/precondition error (409/412)
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::CONFLICT) | Some(StatusCode::PRECONDITION_FAILED)
        )
    }

    /// Returns true if this is a bad request error (400) or a local validation failure
    #[must_use]
    pub fn is_bad_request(&self) -> bool {
        match self {
            CoreError::Validation(_)
            | CoreError::UnsupportedKind(_)
            | CoreError::InvalidVersion { .. } => true,
            _ => self.status() == Some(StatusCode::BAD_REQUEST),
        }
    }

    /// Returns true if the operation never reached the network
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    /// Returns true if this is a request timeout raised by the transport
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            CoreError::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// One coded entry of a failed reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorElement {
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<String>,
}

/// Wire envelope returned by the service on non-2xx replies
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BasicFailedReply {
    #[serde(default)]
    pub errors: Vec<ApiErrorElement>,
}

/// A non-2xx reply from the deployments API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ApiError {
    pub status: StatusCode,
    pub errors: Vec<ApiErrorElement>,
    /// Raw body, kept when it did not decode as a failed reply
    pub body: Option<String>,
}

impl ApiError {
    /// Build from a status code and raw response text
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        match serde_json::from_str::<BasicFailedReply>(body) {
            Ok(reply) if !reply.errors.is_empty() => Self {
                status,
                errors: reply.errors,
                body: None,
            },
            _ => Self {
                status,
                errors: Vec::new(),
                body: (!body.trim().is_empty()).then(|| body.to_string()),
            },
        }
    }

    /// Returns true if any entry carries the given error code
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Error codes in reply order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.code.as_str())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "api error ({})", self.status)?;
        if !self.errors.is_empty() {
            let entries: Vec<String> = self
                .errors
                .iter()
                .map(|e| format!("{}: {}", e.code, e.message))
                .collect();
            write!(f, ": {}", entries.join("; "))?;
        } else if let Some(body) = &self.body {
            write!(f, ": {}", body)?;
        }
        Ok(())
    }
}
