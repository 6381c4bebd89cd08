//! Parameter validation shared by every operation
//!
//! Violations are collected into a [`MultiError`] instead of failing on the
//! first one. Operations push them in a fixed order: API handle, deployment
//! ID, then payload, so the rendered message is stable.

use std::fmt;
use thiserror::Error;

use crate::client::DeploymentApi;

/// Length of a well-formed deployment ID
pub const DEPLOYMENT_ID_LENGTH: usize = 32;

/// A single violated precondition
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("api reference is required for the operation")]
    MissingApi,

    #[error("id {0:?} is invalid")]
    InvalidDeploymentId(String),

    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("{0}")]
    Other(String),
}

/// Aggregated validation failure for one operation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct MultiError {
    prefix: String,
    violations: Vec<Violation>,
}

impl MultiError {
    /// Start an empty error for the named operation
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            violations: Vec::new(),
        }
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Violations in the order they were found
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// `Ok(())` when nothing was pushed
    pub fn into_result(self) -> Result<(), MultiError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Record a missing API handle
    pub fn check_api(&mut self, api: Option<&DeploymentApi>) {
        if api.is_none() {
            self.push(Violation::MissingApi);
        }
    }

    /// Record a malformed deployment ID
    pub fn check_deployment_id(&mut self, id: &str) {
        if !is_valid_deployment_id(id) {
            self.push(Violation::InvalidDeploymentId(id.to_string()));
        }
    }

    /// Record an empty required string field
    pub fn check_not_empty(&mut self, value: &str, what: &'static str) {
        if value.trim().is_empty() {
            self.push(Violation::Empty(what));
        }
    }

    /// Record a missing required payload
    pub fn check_present<T>(&mut self, value: Option<&T>, what: &'static str) {
        if value.is_none() {
            self.push(Violation::Empty(what));
        }
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.violations.len();
        let noun = if n == 1 { "error" } else { "errors" };
        write!(f, "{}: {} {} occurred:", self.prefix, n, noun)?;
        for v in &self.violations {
            write!(f, "\n\t* {}", v)?;
        }
        Ok(())
    }
}

/// Deployment IDs are 32 characters; anything else is rejected before any request
#[must_use]
pub fn is_valid_deployment_id(id: &str) -> bool {
    id.len() == DEPLOYMENT_ID_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_multi_error_is_ok() {
        let merr = MultiError::new("deployment get");
        assert!(merr.into_result().is_ok());
    }

    #[test]
    fn test_violations_keep_order() {
        let mut merr = MultiError::new("deployment update");
        merr.check_api(None);
        merr.check_deployment_id("short");
        merr.check_present::<()>(None, "request payload");

        assert_eq!(
            merr.violations(),
            &[
                Violation::MissingApi,
                Violation::InvalidDeploymentId("short".to_string()),
                Violation::Empty("request payload"),
            ]
        );
        assert_eq!(
            merr.to_string(),
            "deployment update: 3 errors occurred:\n\
             \t* api reference is required for the operation\n\
             \t* id \"short\" is invalid\n\
             \t* request payload cannot be empty"
        );
    }

    #[test]
    fn test_single_error_wording() {
        let mut merr = MultiError::new("deployment delete");
        merr.check_deployment_id("");
        assert_eq!(
            merr.to_string(),
            "deployment delete: 1 error occurred:\n\t* id \"\" is invalid"
        );
    }

    #[test]
    fn test_deployment_id_length() {
        assert!(is_valid_deployment_id("f1d329b0fb34470ba8b18361cabdd2bc"));
        assert!(!is_valid_deployment_id("f1d329b0fb34470ba8b18361cabdd2b"));
        assert!(!is_valid_deployment_id("f1d329b0fb34470ba8b18361cabdd2bcc"));
        assert!(!is_valid_deployment_id(""));
    }

    #[test]
    fn test_check_not_empty_trims() {
        let mut merr = MultiError::new("note add");
        merr.check_not_empty("   ", "note message");
        assert_eq!(merr.violations(), &[Violation::Empty("note message")]);
    }
}
