use reqwest::Method;
use tracing::debug;

use super::{deployment_path, require_api};
use crate::client::DeploymentApi;
use crate::error::Result;
use crate::models::DeploymentUpdateRequest;
use crate::validate::MultiError;

#[derive(Debug, Clone, Default)]
pub struct MigrateParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    /// Template the deployment should move to
    pub template_id: String,
}

impl<'a> MigrateParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>, template_id: impl Into<String>) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
            template_id: template_id.into(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment migrate");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.check_not_empty(&self.template_id, "template id");
        merr.into_result()
    }
}

/// Build the update request that moves a deployment onto another template
///
/// Nothing is changed server side; submit the result with
/// [`update`](super::update) to perform the migration.
pub async fn migrate(params: &MigrateParams<'_>) -> Result<DeploymentUpdateRequest> {
    params.validate()?;
    let api = require_api(params.api, "deployment migrate")?;

    debug!(
        deployment_id = %params.deployment_id,
        template_id = %params.template_id,
        "fetching template migration request"
    );
    let path = format!("{}/migrate_template", deployment_path(&params.deployment_id));
    let request = api
        .request(Method::GET, &path)
        .query(&[("template_id", params.template_id.as_str())]);
    api.send_body(request).await
}
