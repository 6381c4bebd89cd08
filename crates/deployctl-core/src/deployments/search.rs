use reqwest::Method;
use tracing::debug;

use super::require_api;
use crate::client::DeploymentApi;
use crate::error::Result;
use crate::models::{DeploymentsSearchResponse, SearchRequest};
use crate::validate::MultiError;

#[derive(Debug, Clone, Default)]
pub struct SearchParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub request: Option<SearchRequest>,
}

impl<'a> SearchParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, request: SearchRequest) -> Self {
        Self {
            api: Some(api),
            request: Some(request),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment search");
        merr.check_api(self.api);
        merr.check_present(self.request.as_ref(), "request payload");
        merr.into_result()
    }
}

/// Run a query against all deployments
///
/// Only the page selected by the request is returned; follow `cursor`
/// yourself for more.
pub async fn search(params: &SearchParams<'_>) -> Result<DeploymentsSearchResponse> {
    params.validate()?;
    let api = require_api(params.api, "deployment search")?;

    let request = api
        .request(Method::POST, "/deployments/_search")
        .json(&params.request);
    let response: DeploymentsSearchResponse = api.send_body(request).await?;
    debug!(
        matches = response.match_count,
        returned = response.return_count,
        "deployment search finished"
    );
    Ok(response)
}
