//! Credential lookup with environment overrides and optional keyring support
//!
//! A stored value is used as is unless an environment variable overrides
//! it, it holds `${VAR}` references, or it is a `keyring:<key>` reference.
//! References are resolved here rather than on load so that saving a
//! config writes them back unchanged.

use super::error::{ConfigError, Result};
use std::borrow::Cow;
use std::env;

/// Prefix that marks a value as a keyring reference
const KEYRING_PREFIX: &str = "keyring:";

/// Service name for keyring entries
#[cfg(feature = "secure-storage")]
const SERVICE_NAME: &str = "deployctl";

/// Resolves the credential fields of a profile
#[derive(Debug, Default, Clone, Copy)]
pub struct CredentialStore;

impl CredentialStore {
    pub fn new() -> Self {
        Self
    }

    /// Resolve a credential value
    ///
    /// Resolution order:
    /// 1. The environment variable `env_var`, when set
    /// 2. The keyring entry, when `value` starts with `keyring:`
    /// 3. `value` itself
    ///
    /// `${VAR}` and `${VAR:-default}` references in `value` are expanded
    /// before the keyring check.
    pub fn get_credential(&self, value: &str, env_var: Option<&str>) -> Result<String> {
        if let Some(var) = env_var
            && let Ok(env_value) = env::var(var)
        {
            return Ok(env_value);
        }

        let value = expand_env_refs(value);
        let Some(key) = value.strip_prefix(KEYRING_PREFIX) else {
            return Ok(value.into_owned());
        };

        #[cfg(feature = "secure-storage")]
        {
            let entry = keyring::Entry::new(SERVICE_NAME, key)
                .map_err(|e| ConfigError::Keyring(e.to_string()))?;
            entry.get_password().map_err(|e| {
                ConfigError::Keyring(format!(
                    "Failed to retrieve credential '{}' from keyring: {}",
                    key, e
                ))
            })
        }
        #[cfg(not(feature = "secure-storage"))]
        {
            Err(ConfigError::Credential(format!(
                "'{}' references the keyring but the secure-storage feature is not enabled",
                key
            )))
        }
    }

    /// Check if a value is a keyring reference
    pub fn is_keyring_reference(value: &str) -> bool {
        value.starts_with(KEYRING_PREFIX)
    }
}

/// Expand `${VAR}` and `${VAR:-default}` references
///
/// Unset variables without a default are left as written.
pub fn expand_env_refs(value: &str) -> Cow<'_, str> {
    shellexpand::env_with_context_no_errors(value, |var| env::var(var).ok())
}
