use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::refid::populate_ref_id;
use super::{QueryParams, ResourceKind, SYSTEM_ALERTS, deployment_path, require_api, resource_path};
use crate::client::DeploymentApi;
use crate::error::Result;
use crate::models::{
    ApmResourceInfo, AppSearchResourceInfo, DeploymentGetResponse, DeploymentsListResponse,
    ElasticsearchResourceInfo, EnterpriseSearchResourceInfo, IntegrationsServerResourceInfo,
    KibanaResourceInfo,
};
use crate::validate::MultiError;

/// Parameters for [`get`]
#[derive(Debug, Clone, Default)]
pub struct GetParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    pub query: QueryParams,
    /// Fill plan fields from the deployment template
    pub enrich_with_template: bool,
}

impl<'a> GetParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    #[must_use]
    pub fn enrich_with_template(mut self, enrich: bool) -> Self {
        self.enrich_with_template = enrich;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment get");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.into_result()
    }
}

/// Fetch a whole deployment
pub async fn get(params: &GetParams<'_>) -> Result<DeploymentGetResponse> {
    params.validate()?;
    let api = require_api(params.api, "deployment get")?;

    let mut query = params.query.pairs();
    query.push(("enrich_with_template", params.enrich_with_template.to_string()));
    query.push(("show_system_alerts", SYSTEM_ALERTS.to_string()));

    debug!(deployment_id = %params.deployment_id, "fetching deployment");
    let request = api
        .request(Method::GET, &deployment_path(&params.deployment_id))
        .query(&query);
    api.send_body(request).await
}

/// Parameters for the per-kind getters such as [`get_elasticsearch`]
///
/// An empty `ref_id` is discovered with one extra request.
#[derive(Debug, Clone, Default)]
pub struct GetKindParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    pub ref_id: String,
    pub query: QueryParams,
}

impl<'a> GetKindParams<'a> {
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

    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment get");
        merr.check_api(self.api);
        merr.check_deployment_id(&self.deployment_id);
        merr.into_result()
    }
}

async fn get_kind<T: DeserializeOwned>(params: &GetKindParams<'_>, kind: ResourceKind) -> Result<T> {
    params.validate()?;
    let api = require_api(params.api, "deployment get")?;

    let ref_id = populate_ref_id(api, &params.deployment_id, kind, &params.ref_id).await?;

    debug!(deployment_id = %params.deployment_id, %kind, %ref_id, "fetching resource");
    let request = api
        .request(Method::GET, &resource_path(&params.deployment_id, kind, &ref_id))
        .query(&params.query.pairs());
    api.send_body(request).await
}

pub async fn get_elasticsearch(params: &GetKindParams<'_>) -> Result<ElasticsearchResourceInfo> {
    get_kind(params, ResourceKind::Elasticsearch).await
}

pub async fn get_kibana(params: &GetKindParams<'_>) -> Result<KibanaResourceInfo> {
    get_kind(params, ResourceKind::Kibana).await
}

pub async fn get_apm(params: &GetKindParams<'_>) -> Result<ApmResourceInfo> {
    get_kind(params, ResourceKind::Apm).await
}

pub async fn get_appsearch(params: &GetKindParams<'_>) -> Result<AppSearchResourceInfo> {
    get_kind(params, ResourceKind::AppSearch).await
}

pub async fn get_enterprise_search(params: &GetKindParams<'_>) -> Result<EnterpriseSearchResourceInfo> {
    get_kind(params, ResourceKind::EnterpriseSearch).await
}

pub async fn get_integrations_server(params: &GetKindParams<'_>) -> Result<IntegrationsServerResourceInfo> {
    get_kind(params, ResourceKind::IntegrationsServer).await
}

/// Parameters for [`get_resource`]
#[derive(Debug, Clone, Default)]
pub struct GetResourceParams<'a> {
    pub api: Option<&'a DeploymentApi>,
    pub deployment_id: String,
    /// `None` fetches the whole deployment
    pub kind: Option<ResourceKind>,
    pub ref_id: String,
    pub query: QueryParams,
}

impl<'a> GetResourceParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi, deployment_id: impl Into<String>) -> Self {
        Self {
            api: Some(api),
            deployment_id: deployment_id.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: ResourceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.ref_id = ref_id.into();
        self
    }

    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        self.kind_params().validate()
    }

    fn kind_params(&self) -> GetKindParams<'a> {
        GetKindParams {
            api: self.api,
            deployment_id: self.deployment_id.clone(),
            ref_id: self.ref_id.clone(),
            query: self.query,
        }
    }
}

/// Result of [`get_resource`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResourceInfo {
    Deployment(Box<DeploymentGetResponse>),
    Elasticsearch(Box<ElasticsearchResourceInfo>),
    Kibana(Box<KibanaResourceInfo>),
    Apm(Box<ApmResourceInfo>),
    AppSearch(Box<AppSearchResourceInfo>),
    EnterpriseSearch(Box<EnterpriseSearchResourceInfo>),
    IntegrationsServer(Box<IntegrationsServerResourceInfo>),
}

/// Fetch one resource by kind, or the whole deployment without a kind
pub async fn get_resource(params: &GetResourceParams<'_>) -> Result<ResourceInfo> {
    let Some(kind) = params.kind else {
        let get_params = GetParams {
            api: params.api,
            deployment_id: params.deployment_id.clone(),
            query: params.query,
            enrich_with_template: false,
        };
        return Ok(ResourceInfo::Deployment(Box::new(get(&get_params).await?)));
    };

    let kind_params = params.kind_params();
    let info = match kind {
        ResourceKind::Elasticsearch => ResourceInfo::Elasticsearch(Box::new(get_elasticsearch(&kind_params).await?)),
        ResourceKind::Kibana => ResourceInfo::Kibana(Box::new(get_kibana(&kind_params).await?)),
        ResourceKind::Apm => ResourceInfo::Apm(Box::new(get_apm(&kind_params).await?)),
        ResourceKind::AppSearch => ResourceInfo::AppSearch(Box::new(get_appsearch(&kind_params).await?)),
        ResourceKind::EnterpriseSearch => {
            ResourceInfo::EnterpriseSearch(Box::new(get_enterprise_search(&kind_params).await?))
        }
        ResourceKind::IntegrationsServer => {
            ResourceInfo::IntegrationsServer(Box::new(get_integrations_server(&kind_params).await?))
        }
    };
    Ok(info)
}

/// Parameters for [`list`]
#[derive(Debug, Clone, Default)]
pub struct ListParams<'a> {
    pub api: Option<&'a DeploymentApi>,
}

impl<'a> ListParams<'a> {
    #[must_use]
    pub fn new(api: &'a DeploymentApi) -> Self {
        Self { api: Some(api) }
    }

    pub fn validate(&self) -> std::result::Result<(), MultiError> {
        let mut merr = MultiError::new("deployment list");
        merr.check_api(self.api);
        merr.into_result()
    }
}

/// List every deployment visible to the caller
pub async fn list(params: &ListParams<'_>) -> Result<DeploymentsListResponse> {
    params.validate()?;
    let api = require_api(params.api, "deployment list")?;
    api.send_body(api.request(Method::GET, "/deployments")).await
}
