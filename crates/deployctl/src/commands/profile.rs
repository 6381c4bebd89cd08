//! Handlers for `deployctl profile`

use deployctl_core::config::{CredentialStore, Profile, ProfileCredentials};
use serde_json::json;
use tracing::debug;

use crate::cli::ProfileCommands;
use crate::connection::ConnectionManager;
use crate::error::{CliError, Result};
use crate::output::{OutputFormat, print_output};

pub fn handle_profile_command(
    command: &ProfileCommands,
    conn_mgr: &mut ConnectionManager,
    output: OutputFormat,
) -> Result<()> {
    match command {
        ProfileCommands::List => handle_list(conn_mgr, output),
        ProfileCommands::Path => {
            let path = conn_mgr.resolved_config_path()?;
            print_output(&json!({ "path": path.display().to_string() }), output)
        }
        ProfileCommands::Show { name } => {
            let profile = conn_mgr
                .config
                .profiles
                .get(name)
                .ok_or_else(|| CliError::ProfileNotFound { name: name.clone() })?;
            print_output(&profile_summary(conn_mgr, name, profile), output)
        }
        ProfileCommands::Set {
            name,
            host,
            api_key,
            username,
            password,
            insecure,
            timeout_secs,
            default,
        } => {
            let host = host
                .clone()
                .or_else(|| conn_mgr.config.profiles.get(name).map(|p| p.host.clone()))
                .unwrap_or_else(|| deployctl_core::client::DEFAULT_HOST.to_string());

            let mut profile = match (api_key, username) {
                (Some(key), _) => Profile::with_api_key(host, key.as_str()),
                (None, Some(user)) => {
                    let password = match password {
                        Some(p) => p.clone(),
                        None => rpassword::prompt_password(format!("Password for {}: ", user))
                            .map_err(|e| CliError::InvalidInput {
                                message: format!("failed to read password: {}", e),
                            })?,
                    };
                    Profile::with_basic_auth(host, user.as_str(), Some(password))
                }
                (None, None) => {
                    return Err(CliError::InvalidInput {
                        message: "either --api-key or --username is required".to_string(),
                    });
                }
            };
            profile.insecure = *insecure;
            profile.timeout_secs = *timeout_secs;

            debug!("Setting profile: {}", name);
            conn_mgr.config.set_profile(name.clone(), profile);
            if *default || conn_mgr.config.default_profile.is_none() {
                conn_mgr.config.default_profile = Some(name.clone());
            }
            conn_mgr.save_config()?;
            println!("Profile '{}' saved.", name);
            Ok(())
        }
        ProfileCommands::Remove { name } => {
            if conn_mgr.config.remove_profile(name).is_none() {
                return Err(CliError::ProfileNotFound { name: name.clone() });
            }
            conn_mgr.save_config()?;
            println!("Profile '{}' removed.", name);
            Ok(())
        }
        ProfileCommands::Default { name } => {
            if !conn_mgr.config.profiles.contains_key(name) {
                return Err(CliError::ProfileNotFound { name: name.clone() });
            }
            conn_mgr.config.default_profile = Some(name.clone());
            conn_mgr.save_config()?;
            println!("Default profile set to '{}'.", name);
            Ok(())
        }
    }
}

fn handle_list(conn_mgr: &ConnectionManager, output: OutputFormat) -> Result<()> {
    let profiles: Vec<_> = conn_mgr
        .config
        .list_profiles()
        .into_iter()
        .map(|(name, profile)| profile_summary(conn_mgr, name, profile))
        .collect();
    debug!("Found {} profiles", profiles.len());
    print_output(&profiles, output)
}

/// Profile description with secrets masked
fn profile_summary(conn_mgr: &ConnectionManager, name: &str, profile: &Profile) -> serde_json::Value {
    let mut summary = json!({
        "name": name,
        "host": profile.host,
        "insecure": profile.insecure,
        "is_default": conn_mgr.config.default_profile.as_deref() == Some(name),
    });
    if let Some(timeout) = profile.timeout_secs {
        summary["timeout_secs"] = json!(timeout);
    }
    match &profile.credentials {
        ProfileCredentials::ApiKey { api_key } => {
            summary["auth"] = json!("api_key");
            summary["api_key"] = json!(mask(api_key));
        }
        ProfileCredentials::Basic { username, password } => {
            summary["auth"] = json!("basic");
            summary["username"] = json!(username);
            summary["password"] = json!(password.as_deref().map(mask));
        }
    }
    summary
}

fn mask(secret: &str) -> String {
    if CredentialStore::is_keyring_reference(secret) {
        return secret.to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{}****", visible)
}
