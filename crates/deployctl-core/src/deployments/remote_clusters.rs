//! Cross-cluster search and replication targets of an Elasticsearch resource

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, info};

use super::refid::populate_ref_id;
use super::{ResourceKind, require_api, resource_path};
use crate::client::DeploymentApi;
use crate::error::Result;
use crate::models::RemoteResources;
use crate::validate::MultiError;

fn remote_clusters_path(deployment_id: &str, ref_id: &str) -> String {
    format!(
        "{}/remote-clusters",
        resource_path(deployment_id, ResourceKind::Elasticsearch, ref_id)
    )
}

#[derive(Debug, Clone, Default)]
pub struct GetRemoteClustersParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    /// Elasticsearch RefID, discovered when empty
    pub ref_id: String,
}

impl<'a> GetRemoteClustersParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment remote clusters");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.into_result()
    }
}

pub async fn get_remote_clusters(params: &GetRemoteClustersParams<'_>) -> Result<RemoteResources> {
    params.validate()?;
    let api = require_api(params.api, "deployment remote clusters")?;

    let ref_id = populate_ref_id(api, &params.deployment_id, ResourceKind::Elasticsearch, &params.ref_id).await?;
    let request = api.request(Method::GET, &remote_clusters_path(&params.deployment_id, &ref_id));
    api.send_body(request).await
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRemoteClustersParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    pub ref_id: String,
    /// Complete list of remotes; anything not listed is removed
    pub remote_resources: Option<RemoteResources>,
}

impl<'a> UpdateRemoteClustersParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>, remotes: RemoteResources) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
            ref_id: String::new(),
            remote_resources: Some(remotes),
        }
    }

    #[must_use]
    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment remote clusters");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.check_present(self.remote_resources.as_ref(), "remote resources");
        merr.into_result()
    }
}

/// Replace the remote clusters of an Elasticsearch resource
pub async fn update_remote_clusters(params: &UpdateRemoteClustersParams<'_>) -> Result<()> {
    params.validate()?;
    let api = require_api(params.api, "deployment remote clusters")?;

    let ref_id = populate_ref_id(api, &params.deployment_id, ResourceKind::Elasticsearch, &params.ref_id).await?;
    debug!(
        deployment_id = %params.deployment_id,
        %ref_id,
        remotes = params.remote_resources.as_ref().map_or(0, |r| r.resources.len()),
        "updating remote clusters"
    );

    let request = api
        .request(Method::PUT, &remote_clusters_path(&params.deployment_id, &ref_id))
        .json(&params.remote_resources);
    let _: Value = api.send_body(request).await?;
    info!(deployment_id = %params.deployment_id, "remote clusters updated");
    Ok(())
}
