//! Commands addressed at a single resource of a deployment
//!
//! Every action takes the same [`ResourceParams`]; each one only sends the
//! flags its endpoint understands.

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::refid::populate_ref_id;
use super::{ResourceKind, require_api, resource_path};
use crate::client::DeploymentApi;
use crate::error::{CoreError, Result};
use crate::models::{DeploymentResourceCommandResponse, DeploymentResourceUpgradeResponse};
use crate::validate::{MultiError, Violation};

#[derive(Debug, Clone, Default)]
pub struct ResourceParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    pub kind: Option<ResourceKind>,
    /// Discovered from the deployment when empty
    pub ref_id: String,
    /// `_shutdown`, `_restart`
    pub skip_snapshot: bool,
    /// `_shutdown`
    pub hide: bool,
    /// `_restart`, `_restore`
    pub restore_snapshot: bool,
    /// `_restart`
    pub cancel_pending: bool,
    /// `_upgrade`
    pub validate_only: bool,
}

impl<'a> ResourceParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>, kind: ResourceKind) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
            kind: Some(kind),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }

    #[must_use]
    pub fn skip_snapshot(mut self, skip: bool) -> Self {
        self.skip_snapshot = skip;
        self
    }

    #[must_use]
    pub fn hide(mut self, hide: bool) -> Self {
        self.hide = hide;
        self
    }

    #[must_use]
    pub fn restore_snapshot(mut self, restore: bool) -> Self {
        self.restore_snapshot = restore;
        self
    }

    #[must_use]
    pub fn cancel_pending(mut self, cancel: bool) -> Self {
        self.cancel_pending = cancel;
        self
    }

    #[must_use]
    pub fn validate_only(mut self, validate_only: bool) -> Self {
        self.validate_only = validate_only;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        self.collect("deployment resource").into_result()
    }

    fn collect(&self, operation: &str) -> MultiError {
        let mut merr = MultiError::new(operation);
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.check_present(self.kind.as_ref(), "resource kind");
        merr
    }
}

/// Validated handle, kind and resolved RefID
async fn prepare<'a>(
    params: &ResourceParams<'a>,
    operation: &str,
    stateless_only: bool,
) -> Result<(&'a DeploymentApi, ResourceKind, String)> {
    let mut merr = params.collect(operation);
    if stateless_only
        && let Some(kind) = params.kind
        && !kind.is_stateless()
    {
        merr.push(Violation::Other(format!(
            "{} resources cannot be deleted individually",
            kind
        )));
    }
    merr.into_result()?;

    let api = require_api(params.api, operation)?;
    let Some(kind) = params.kind else {
        return Err(CoreError::InvalidInput(format!("{}: resource kind is required", operation)));
    };
    let ref_id = populate_ref_id(api, &params.deployment_id, kind, &params.ref_id).await?;
    Ok((api, kind, ref_id))
}

async fn command<T: DeserializeOwned>(
    params: &ResourceParams<'_>,
    action: &str,
    query: &[(&str, bool)],
) -> Result<T> {
    let operation = format!("deployment resource {}", action.trim_start_matches('_'));
    let (api, kind, ref_id) = prepare(params, &operation, false).await?;

    debug!(deployment_id = %params.deployment_id, %kind, %ref_id, action, "sending resource command");
    let path = format!("{}/{}", resource_path(&params.deployment_id, kind, &ref_id), action);
    let response = api.send_body(api.request(Method::POST, &path).query(query)).await?;
    info!(deployment_id = %params.deployment_id, %kind, %ref_id, action, "resource command accepted");
    Ok(response)
}

pub async fn shutdown_resource(params: &ResourceParams<'_>) -> Result<DeploymentResourceCommandResponse> {
    command(
        params,
        "_shutdown",
        &[("hide", params.hide), ("skip_snapshot", params.skip_snapshot)],
    )
    .await
}

pub async fn start_resource(params: &ResourceParams<'_>) -> Result<DeploymentResourceCommandResponse> {
    command(params, "_start", &[]).await
}

pub async fn restart_resource(params: &ResourceParams<'_>) -> Result<DeploymentResourceCommandResponse> {
    command(
        params,
        "_restart",
        &[
            ("cancel_pending", params.cancel_pending),
            ("restore_snapshot", params.restore_snapshot),
            ("skip_snapshot", params.skip_snapshot),
        ],
    )
    .await
}

/// Upgrade a resource to the version of its deployment's Elasticsearch
pub async fn upgrade_resource(params: &ResourceParams<'_>) -> Result<DeploymentResourceUpgradeResponse> {
    command(params, "_upgrade", &[("validate_only", params.validate_only)]).await
}

pub async fn restore_resource(params: &ResourceParams<'_>) -> Result<DeploymentResourceCommandResponse> {
    command(params, "_restore", &[("restore_snapshot", params.restore_snapshot)]).await
}

/// Delete a shut down resource; Elasticsearch can only go with its deployment
pub async fn delete_resource(params: &ResourceParams<'_>) -> Result<DeploymentResourceCommandResponse> {
    let (api, kind, ref_id) = prepare(params, "deployment resource delete", true).await?;

    let request = api.request(Method::DELETE, &resource_path(&params.deployment_id, kind, &ref_id));
    let response = api.send_body(request).await?;
    info!(deployment_id = %params.deployment_id, %kind, %ref_id, "resource deleted");
    Ok(response)
}
