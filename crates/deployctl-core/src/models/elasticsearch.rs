//! Elasticsearch resource models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{PlansInfo, ResourceSettings, TopologySize};

/// Elasticsearch version and plugin settings of a plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElasticsearchConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enabled_built_in_plugins: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Legacy role flags of a topology element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElasticsearchNodeType {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingest: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ml: Option<bool>,
}

/// One tier of an Elasticsearch cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElasticsearchClusterTopologyElement {
    /// Tier identifier such as `hot_content` or `warm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_configuration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<TopologySize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_per_node: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_count_per_zone: Option<i32>,
    /// Pre data-tier role description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_type: Option<ElasticsearchNodeType>,
    /// Data-tier role description (7.10.0 onwards)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_roles: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ElasticsearchClusterTopologyElement {
    /// Carries both the legacy and the data-tier role description
    #[must_use]
    pub fn has_both_role_schemes(&self) -> bool {
        self.node_type.is_some() && self.node_roles.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// Explicit capacity was requested, either by size or legacy memory
    #[must_use]
    pub fn is_sized(&self) -> bool {
        self.memory_per_node.is_some_and(|m| m > 0) || TopologySize::is_positive(self.size.as_ref())
    }
}

/// Template a deployment was created from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTemplateReference {
    pub id: String,
}

/// Elasticsearch plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElasticsearchClusterPlan {
    #[serde(default)]
    pub elasticsearch: ElasticsearchConfiguration,
    #[serde(default)]
    pub cluster_topology: Vec<ElasticsearchClusterTopologyElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_template: Option<DeploymentTemplateReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Service-reported state of an Elasticsearch cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElasticsearchClusterInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub plan_info: PlansInfo<ElasticsearchClusterPlan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ResourceSettings>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Elasticsearch entry of a deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElasticsearchResourceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub ref_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub info: ElasticsearchClusterInfo,
}

/// Elasticsearch write payload for create/update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElasticsearchPayload {
    #[serde(default)]
    pub ref_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub plan: ElasticsearchClusterPlan,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ResourceSettings>,
}
