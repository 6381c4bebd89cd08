use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Kind of resource inside a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Elasticsearch,
    Kibana,
    Apm,
    #[serde(rename = "appsearch")]
    #[value(name = "appsearch")]
    AppSearch,
    #[value(name = "enterprise_search")]
    EnterpriseSearch,
    #[value(name = "integrations_server")]
    IntegrationsServer,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Elasticsearch,
        ResourceKind::Kibana,
        ResourceKind::Apm,
        ResourceKind::AppSearch,
        ResourceKind::EnterpriseSearch,
        ResourceKind::IntegrationsServer,
    ];

    /// Name used in API paths and payloads
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Elasticsearch => "elasticsearch",
            ResourceKind::Kibana => "kibana",
            ResourceKind::Apm => "apm",
            ResourceKind::AppSearch => "appsearch",
            ResourceKind::EnterpriseSearch => "enterprise_search",
            ResourceKind::IntegrationsServer => "integrations_server",
        }
    }

    /// RefID assigned when overrides ask for canonical ids
    #[must_use]
    pub fn canonical_ref_id(&self) -> &'static str {
        match self {
            ResourceKind::Elasticsearch => "main-elasticsearch",
            ResourceKind::Kibana => "main-kibana",
            ResourceKind::Apm => "main-apm",
            ResourceKind::AppSearch => "main-appsearch",
            ResourceKind::EnterpriseSearch => "main-enterprise_search",
            ResourceKind::IntegrationsServer => "main-integrations_server",
        }
    }

    /// Stateless kinds can be deleted individually
    #[must_use]
    pub fn is_stateless(&self) -> bool {
        !matches!(self, ResourceKind::Elasticsearch)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| CoreError::UnsupportedKind(s.to_string()))
    }
}
