use rand::distr::{Alphanumeric, SampleString};
use reqwest::Method;
use tracing::{debug, info};

use super::overrides::{CreateOrUpdate, PayloadOverrides, override_create_or_update_request};
use super::require_api;
use crate::client::{ApiResponse, DeploymentApi};
use crate::error::Result;
use crate::models::{DeploymentCreateRequest, DeploymentCreateResponse};
use crate::validate::MultiError;

/// Length of generated idempotency tokens
pub const REQUEST_ID_LENGTH: usize = 64;

const OPERATION: &str = "deployment create";

/// Parameters for [`create`]
#[derive(Debug, Clone, Default)]
pub struct CreateParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub request: Option<DeploymentCreateRequest>,
    /// Idempotency token; repeated creates with the same token are deduplicated
    pub request_id: Option<String>,
    pub overrides: Option<PayloadOverrides>,
    /// Ask the service to validate the payload without creating anything
    pub validate_only: bool,
}

impl<'a> CreateParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, request: DeploymentCreateRequest) -> Self {
        Self {
            api: Some(api),
            request: Some(request),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: PayloadOverrides) -> Self {
        self.overrides = Some(overrides);
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
        merr.check_present(self.request.as_ref(), "request payload");
        merr.into_result()
    }
}

/// Return `token` or a fresh random idempotency token
#[must_use]
pub fn request_id(token: Option<&str>) -> String {
    match token {
        Some(token) if !token.is_empty() => token.to_string(),
        _ => Alphanumeric.sample_string(&mut rand::rng(), REQUEST_ID_LENGTH),
    }
}

/// Create a deployment
///
/// Overrides, when given, are applied to a copy of the request. The
/// bookkeeping headers of the reply are kept on the returned response.
pub async fn create(params: &CreateParams<'_>) -> Result<ApiResponse<DeploymentCreateResponse>> {
    params.validate()?;
    let api = require_api(params.api, OPERATION)?;

    let mut request = params.request.clone().unwrap_or_default();
    if let Some(overrides) = &params.overrides {
        override_create_or_update_request(CreateOrUpdate::Create(&mut request), overrides)?;
    }

    let mut query = vec![("validate_only", params.validate_only.to_string())];
    if let Some(id) = params.request_id.as_deref().filter(|id| !id.is_empty()) {
        query.push(("request_id", id.to_string()));
    }

    debug!(name = ?request.name, validate_only = params.validate_only, "creating deployment");
    let builder = api
        .request(Method::POST, "/deployments")
        .query(&query)
        .json(&request);
    let response: ApiResponse<DeploymentCreateResponse> = api.send(builder).await?;
    info!(deployment_id = %response.body.id, "deployment created");
    Ok(response)
}
