//! Delete, shut down and restore whole deployments

use reqwest::Method;
use tracing::info;

use super::{deployment_path, require_api};
use crate::client::DeploymentApi;
use crate::error::Result;
use crate::models::{DeploymentDeleteResponse, DeploymentRestoreResponse, DeploymentShutdownResponse};
use crate::validate::MultiError;

#[derive(Debug, Clone, Default)]
pub struct DeleteParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
}

impl<'a> DeleteParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
        }
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment delete");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.into_result()
    }
}

/// Delete a deployment that has been shut down
pub async fn delete(params: &DeleteParams<'_>) -> Result<DeploymentDeleteResponse> {
    params.validate()?;
    let api = require_api(params.api, "deployment delete")?;

    let request = api.request(Method::DELETE, &deployment_path(&params.deployment_id));
    let response = api.send_body(request).await?;
    info!(deployment_id = %params.deployment_id, "deployment deleted");
    Ok(response)
}

#[derive(Debug, Clone, Default)]
pub struct ShutdownParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    pub skip_snapshot: bool,
    /// Hide the deployment from listings once it is stopped
    pub hide: bool,
}

impl<'a> ShutdownParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
            ..Default::default()
        }
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

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment shutdown");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.into_result()
    }
}

/// Stop every resource of a deployment
pub async fn shutdown(params: &ShutdownParams<'_>) -> Result<DeploymentShutdownResponse> {
    params.validate()?;
    let api = require_api(params.api, "deployment shutdown")?;

    let path = format!("{}/_shutdown", deployment_path(&params.deployment_id));
    let request = api
        .request(Method::POST, &path)
        .query(&[("skip_snapshot", params.skip_snapshot), ("hide", params.hide)]);
    let response = api.send_body(request).await?;
    info!(deployment_id = %params.deployment_id, "deployment shut down");
    Ok(response)
}

#[derive(Debug, Clone, Default)]
pub struct RestoreParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    /// Restore Elasticsearch data from the latest snapshot
    pub restore_snapshot: bool,
}

impl<'a> RestoreParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn restore_snapshot(mut self, restore: bool) -> Self {
        self.restore_snapshot = restore;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment restore");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.into_result()
    }
}

/// Bring a shut down deployment back up
pub async fn restore(params: &RestoreParams<'_>) -> Result<DeploymentRestoreResponse> {
    params.validate()?;
    let api = require_api(params.api, "deployment restore")?;

    let path = format!("{}/_restore", deployment_path(&params.deployment_id));
    let request = api
        .request(Method::POST, &path)
        .query(&[("restore_snapshot", params.restore_snapshot)]);
    let response = api.send_body(request).await?;
    info!(deployment_id = %params.deployment_id, "deployment restored");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{DEPLOYMENT_ID, api, deployment_path};
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(deployment_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": DEPLOYMENT_ID,
                "name": "my-deployment",
                "resources": []
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api(&server);
        let response = delete(&DeleteParams::new(&api, DEPLOYMENT_ID)).await.unwrap();
        assert_eq!(response.id, DEPLOYMENT_ID);
    }

    #[tokio::test]
    async fn test_delete_invalid_id_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let api = api(&server);
        let err = delete(&DeleteParams::new(&api, "f1d329b0fb34470ba8b18361cabdd2bcX"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_shutdown_flags() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{}/_shutdown", deployment_path())))
            .and(query_param("skip_snapshot", "true"))
            .and(query_param("hide", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": DEPLOYMENT_ID,
                "name": "my-deployment"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api(&server);
        let params = ShutdownParams::new(&api, DEPLOYMENT_ID).skip_snapshot(true).hide(true);
        let response = shutdown(&params).await.unwrap();
        assert_eq!(response.name, "my-deployment");
    }

    #[tokio::test]
    async fn test_restore() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("{}/_restore", deployment_path())))
            .and(query_param("restore_snapshot", "false"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": DEPLOYMENT_ID,
                "name": "my-deployment"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = api(&server);
        let response = restore(&RestoreParams::new(&api, DEPLOYMENT_ID)).await.unwrap();
        assert_eq!(response.id, DEPLOYMENT_ID);
    }

    #[tokio::test]
    async fn test_restore_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let api = api(&server);
        let err = restore(&RestoreParams::new(&api, DEPLOYMENT_ID)).await.unwrap_err();
        assert!(err.is_server_error());
        assert!(err.to_string().contains("500"));
    }
}
