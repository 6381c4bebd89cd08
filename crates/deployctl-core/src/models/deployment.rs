//! Deployment-level request and response models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::elasticsearch::{ElasticsearchPayload, ElasticsearchResourceInfo};
use super::stateless::{
    ApmPayload, ApmResourceInfo, AppSearchPayload, AppSearchResourceInfo,
    EnterpriseSearchPayload, EnterpriseSearchResourceInfo, IntegrationsServerPayload,
    IntegrationsServerResourceInfo, KibanaPayload, KibanaResourceInfo,
};

/// Every resource of a deployment, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentResources {
    #[serde(default)]
    pub elasticsearch: Vec<ElasticsearchResourceInfo>,
    #[serde(default)]
    pub kibana: Vec<KibanaResourceInfo>,
    #[serde(default)]
    pub apm: Vec<ApmResourceInfo>,
    #[serde(default)]
    pub appsearch: Vec<AppSearchResourceInfo>,
    #[serde(default)]
    pub enterprise_search: Vec<EnterpriseSearchResourceInfo>,
    #[serde(default)]
    pub integrations_server: Vec<IntegrationsServerResourceInfo>,
}

/// Deployment-wide settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observability: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /deployments/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentGetResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
    #[serde(default)]
    pub resources: DeploymentResources,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<DeploymentSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Write payloads of a create or update request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPayloadResources {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub elasticsearch: Vec<ElasticsearchPayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kibana: Vec<KibanaPayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub apm: Vec<ApmPayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub appsearch: Vec<AppSearchPayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enterprise_search: Vec<EnterpriseSearchPayload>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub integrations_server: Vec<IntegrationsServerPayload>,
}

/// `POST /deployments` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentCreateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<DeploymentPayloadResources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Settings accepted on update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentUpdateSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observability: Option<Value>,
}

/// `PUT /deployments/{id}` body
///
/// The service expects the full desired state, not a diff.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// When true, kinds missing from `resources` are deleted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prune_orphans: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<DeploymentPayloadResources>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<DeploymentUpdateSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Summary of one resource in write responses and listings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentResource {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub ref_id: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentCreateResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<bool>,
    #[serde(default)]
    pub resources: Vec<DeploymentResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentUpdateResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub resources: Vec<DeploymentResource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shutdown_resources: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentDeleteResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub resources: Vec<DeploymentResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentShutdownResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orphaned: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentRestoreResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Entry of `GET /deployments`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentsListItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default)]
    pub resources: Vec<DeploymentResource>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentsListResponse {
    #[serde(default)]
    pub deployments: Vec<DeploymentsListItem>,
}

/// `POST /deployments/_search` body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Elasticsearch-style query DSL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

impl SearchRequest {
    /// Match every deployment
    #[must_use]
    pub fn match_all() -> Self {
        Self {
            query: Some(serde_json::json!({ "match_all": {} })),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentsSearchResponse {
    #[serde(default)]
    pub deployments: Vec<DeploymentGetResponse>,
    #[serde(default)]
    pub match_count: i32,
    #[serde(default)]
    pub return_count: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
}

/// Outcome of a resync call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndexSynchronizationResults {
    #[serde(default)]
    pub synced_ids: Vec<String>,
    #[serde(default)]
    pub failed_ids: Vec<String>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

/// Reply of the per-resource `_shutdown`, `_start`, `_restart` and `_restore` commands
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentResourceCommandResponse {
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reply of `_upgrade` on a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentResourceUpgradeResponse {
    #[serde(default)]
    pub resource_id: String,
    #[serde(default)]
    pub ref_id: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}
