//! Wire types shared by every resource kind

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Capacity of one topology element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologySize {
    /// `memory` or `storage`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i32>,
}

impl TopologySize {
    /// Memory size in MB
    #[must_use]
    pub fn memory(value: i32) -> Self {
        Self {
            resource: Some("memory".to_string()),
            value: Some(value),
        }
    }

    /// True when an explicit, positive value is present
    #[must_use]
    pub fn is_positive(size: Option<&TopologySize>) -> bool {
        size.and_then(|s| s.value).is_some_and(|v| v > 0)
    }
}

/// Version and user settings of a resource plan
///
/// The field carrying this struct is named after the kind (`kibana`, `apm`, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Topology element for every kind but Elasticsearch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_configuration_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<TopologySize>,
    /// Legacy sizing, only honoured for Kibana
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_per_node: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_count_per_zone: Option<i32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Settings attached to a resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSettings {
    /// Derived by the service; never sent back on update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceSettings {
    /// Copy of these settings without the read-only metadata
    #[must_use]
    pub fn without_metadata(&self) -> Self {
        Self {
            metadata: None,
            extra: self.extra.clone(),
        }
    }
}

/// One plan as reported by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanInfo<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<P>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<P> Default for PlanInfo<P> {
    fn default() -> Self {
        Self {
            plan: None,
            healthy: None,
            extra: Map::new(),
        }
    }
}

/// Current and pending plans of a resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlansInfo<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<PlanInfo<P>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<PlanInfo<P>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl<P> Default for PlansInfo<P> {
    fn default() -> Self {
        Self {
            current: None,
            pending: None,
            healthy: None,
            extra: Map::new(),
        }
    }
}

impl<P> PlansInfo<P> {
    /// The current plan, if the service reported one
    #[must_use]
    pub fn current_plan(&self) -> Option<&P> {
        self.current.as_ref().and_then(|c| c.plan.as_ref())
    }
}
