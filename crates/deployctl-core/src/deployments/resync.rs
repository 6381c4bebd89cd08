//! Reindex deployments into the service's search index

use reqwest::Method;
use tracing::{info, warn};

use super::{deployment_path, require_api};
use crate::client::DeploymentApi;
use crate::error::Result;
use crate::models::IndexSynchronizationResults;
use crate::validate::MultiError;

#[derive(Debug, Clone, Default)]
pub struct ResyncParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
}

impl<'a> ResyncParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment resync");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.into_result()
    }
}

/// Resynchronize one deployment
pub async fn resync(params: &ResyncParams<'_>) -> Result<IndexSynchronizationResults> {
    params.validate()?;
    let api = require_api(params.api, "deployment resync")?;

    let path = format!("{}/_resync", deployment_path(&params.deployment_id));
    let results: IndexSynchronizationResults = api.send_body(api.request(Method::POST, &path)).await?;
    log_results(&results);
    Ok(results)
}

#[derive(Debug, Clone, Default)]
pub struct ResyncAllParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    /// Leave deployments already indexed at the current version alone
    pub skip_matching_version: bool,
}

impl<'a> ResyncAllParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi) -> Self {
        Self {
            api: Some(api),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn skip_matching_version(mut self, skip: bool) -> Self {
        self.skip_matching_version = skip;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment resync");
        merr.check_api(self.api);
        merr.into_result()
    }
}

/// Resynchronize every deployment
pub async fn resync_all(params: &ResyncAllParams<'_>) -> Result<IndexSynchronizationResults> {
    params.validate()?;
    let api = require_api(params.api, "deployment resync")?;

    let request = api
        .request(Method::POST, "/deployments/_resync")
        .query(&[("skip_matching_version", params.skip_matching_version)]);
    let results: IndexSynchronizationResults = api.send_body(request).await?;
    log_results(&results);
    Ok(results)
}

fn log_results(results: &IndexSynchronizationResults) {
    if results.failed_ids.is_empty() {
        info!(synced = results.synced_ids.len(), "resync finished");
    } else {
        warn!(
            synced = results.synced_ids.len(),
            failed = ?results.failed_ids,
            "resync finished with failures"
        );
    }
}
