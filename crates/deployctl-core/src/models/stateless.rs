//! Kibana, APM, App Search, Enterprise Search and Integrations Server models
//!
//! These kinds share one shape: a plan named after the kind, a flat
//! topology and a back-reference to the Elasticsearch resource they depend
//! on. Only the plan struct differs between them; [`StatelessPlan`] lets the
//! payload and translation code treat them uniformly.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{PlansInfo, ResourceConfiguration, ResourceSettings, TopologyElement};
use crate::deployments::ResourceKind;

/// Common access to the plan of a non-Elasticsearch resource
pub trait StatelessPlan: Clone + Default + Serialize + DeserializeOwned {
    const KIND: ResourceKind;

    fn configuration_mut(&mut self) -> &mut ResourceConfiguration;
    fn cluster_topology_mut(&mut self) -> &mut Vec<TopologyElement>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KibanaClusterPlan {
    #[serde(default)]
    pub kibana: ResourceConfiguration,
    #[serde(default)]
    pub cluster_topology: Vec<TopologyElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApmPlan {
    #[serde(default)]
    pub apm: ResourceConfiguration,
    #[serde(default)]
    pub cluster_topology: Vec<TopologyElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSearchPlan {
    #[serde(default)]
    pub appsearch: ResourceConfiguration,
    #[serde(default)]
    pub cluster_topology: Vec<TopologyElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnterpriseSearchPlan {
    #[serde(default)]
    pub enterprise_search: ResourceConfiguration,
    #[serde(default)]
    pub cluster_topology: Vec<TopologyElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntegrationsServerPlan {
    #[serde(default)]
    pub integrations_server: ResourceConfiguration,
    #[serde(default)]
    pub cluster_topology: Vec<TopologyElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transient: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StatelessPlan for KibanaClusterPlan {
    const KIND: ResourceKind = ResourceKind::Kibana;

    fn configuration_mut(&mut self) -> &mut ResourceConfiguration {
        &mut self.kibana
    }
    fn cluster_topology_mut(&mut self) -> &mut Vec<TopologyElement> {
        &mut self.cluster_topology
    }
}

impl StatelessPlan for ApmPlan {
    const KIND: ResourceKind = ResourceKind::Apm;

    fn configuration_mut(&mut self) -> &mut ResourceConfiguration {
        &mut self.apm
    }
    fn cluster_topology_mut(&mut self) -> &mut Vec<TopologyElement> {
        &mut self.cluster_topology
    }
}

impl StatelessPlan for AppSearchPlan {
    const KIND: ResourceKind = ResourceKind::AppSearch;

    fn configuration_mut(&mut self) -> &mut ResourceConfiguration {
        &mut self.appsearch
    }
    fn cluster_topology_mut(&mut self) -> &mut Vec<TopologyElement> {
        &mut self.cluster_topology
    }
}

impl StatelessPlan for EnterpriseSearchPlan {
    const KIND: ResourceKind = ResourceKind::EnterpriseSearch;

    fn configuration_mut(&mut self) -> &mut ResourceConfiguration {
        &mut self.enterprise_search
    }
    fn cluster_topology_mut(&mut self) -> &mut Vec<TopologyElement> {
        &mut self.cluster_topology
    }
}

impl StatelessPlan for IntegrationsServerPlan {
    const KIND: ResourceKind = ResourceKind::IntegrationsServer;

    fn configuration_mut(&mut self) -> &mut ResourceConfiguration {
        &mut self.integrations_server
    }
    fn cluster_topology_mut(&mut self) -> &mut Vec<TopologyElement> {
        &mut self.cluster_topology
    }
}

/// Service-reported state of a non-Elasticsearch resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: DeserializeOwned + Default", serialize = "P: Serialize"))]
pub struct StatelessClusterInfo<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub plan_info: PlansInfo<P>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ResourceSettings>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<P> Default for StatelessClusterInfo<P> {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            healthy: None,
            status: None,
            plan_info: PlansInfo::default(),
            settings: None,
            extra: Map::new(),
        }
    }
}

/// Non-Elasticsearch entry of a deployment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: DeserializeOwned + Default", serialize = "P: Serialize"))]
pub struct StatelessResourceInfo<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub ref_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elasticsearch_cluster_ref_id: Option<String>,
    #[serde(default)]
    pub info: StatelessClusterInfo<P>,
}

impl<P> Default for StatelessResourceInfo<P> {
    fn default() -> Self {
        Self {
            id: None,
            ref_id: String::new(),
            region: None,
            elasticsearch_cluster_ref_id: None,
            info: StatelessClusterInfo::default(),
        }
    }
}

/// Non-Elasticsearch write payload for create/update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "P: DeserializeOwned + Default", serialize = "P: Serialize"))]
pub struct StatelessPayload<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elasticsearch_cluster_ref_id: Option<String>,
    #[serde(default)]
    pub ref_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub plan: P,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<ResourceSettings>,
}

impl<P: Default> Default for StatelessPayload<P> {
    fn default() -> Self {
        Self {
            elasticsearch_cluster_ref_id: None,
            ref_id: String::new(),
            region: None,
            display_name: None,
            plan: P::default(),
            settings: None,
        }
    }
}

pub type KibanaResourceInfo = StatelessResourceInfo<KibanaClusterPlan>;
pub type ApmResourceInfo = StatelessResourceInfo<ApmPlan>;
pub type AppSearchResourceInfo = StatelessResourceInfo<AppSearchPlan>;
pub type EnterpriseSearchResourceInfo = StatelessResourceInfo<EnterpriseSearchPlan>;
pub type IntegrationsServerResourceInfo = StatelessResourceInfo<IntegrationsServerPlan>;

pub type KibanaPayload = StatelessPayload<KibanaClusterPlan>;
pub type ApmPayload = StatelessPayload<ApmPlan>;
pub type AppSearchPayload = StatelessPayload<AppSearchPlan>;
pub type EnterpriseSearchPayload = StatelessPayload<EnterpriseSearchPlan>;
pub type IntegrationsServerPayload = StatelessPayload<IntegrationsServerPlan>;
