use reqwest::Method;
use tracing::{debug, info};

use super::overrides::{CreateOrUpdate, PayloadOverrides, override_create_or_update_request};
use super::{deployment_path, require_api};
use crate::client::{ApiResponse, DeploymentApi};
use crate::error::Result;
use crate::models::{DeploymentUpdateRequest, DeploymentUpdateResponse};
use crate::validate::MultiError;

const OPERATION: &str = "deployment update";

/// Parameters for [`update`]
#[derive(Debug, Clone, Default)]
pub struct UpdateParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    pub request: Option<DeploymentUpdateRequest>,
    pub overrides: Option<PayloadOverrides>,
    /// Skip the snapshot taken before resources are removed
    pub skip_snapshot: bool,
    /// Leave pruned resources out of the reply
    pub hide_pruned_orphans: bool,
    pub validate_only: bool,
}

impl<'a> UpdateParams<'a> {
    #[must_use]
    pub fn new(
        api: &'a DeploymentApi,
        deployment_id: impl Into<String>,
        request: DeploymentUpdateRequest,
    ) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
            request: Some(request),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: PayloadOverrides) -> Self {
        self.overrides = Some(overrides);
        self
    }

    #[must_use]
    pub fn skip_snapshot(mut self, skip: bool) -> Self {
        self.skip_snapshot = skip;
        self
    }

    #[must_use]
    pub fn hide_pruned_orphans(mut self, hide: bool) -> Self {
        self.hide_pruned_orphans = hide;
        self
    }

    #[must_use]
    pub fn validate_only(mut self, validate_only: bool) -> Self {
        self.validate_only = validate_only;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new(OPERATION);
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.check_present(self.request.as_ref(), "request payload");
        merr.into_result()
    }
}

/// Replace the desired state of a deployment
pub async fn update(params: &UpdateParams<'_>) -> Result<ApiResponse<DeploymentUpdateResponse>> {
    params.validate()?;
    let api = require_api(params.api, OPERATION)?;

    let mut request = params.request.clone().unwrap_or_default();
    if let Some(overrides) = &params.overrides {
        override_create_or_update_request(CreateOrUpdate::Update(&mut request), overrides)?;
    }

    let query = [
        ("skip_snapshot", params.skip_snapshot),
        ("hide_pruned_orphans", params.hide_pruned_orphans),
        ("validate_only", params.validate_only),
    ];

    debug!(
        deployment_id = %params.deployment_id,
        prune_orphans = ?request.prune_orphans,
        "updating deployment"
    );
    let builder = api
        .request(Method::PUT, &deployment_path(&params.deployment_id))
        .query(&query)
        .json(&request);
    let response: ApiResponse<DeploymentUpdateResponse> = api.send(builder).await?;
    info!(deployment_id = %params.deployment_id, "deployment updated");
    Ok(response)
}
