//! Centrally configured overrides applied to create and update payloads
//!
//! One [`PayloadOverrides`] value is applied to every resource of every kind
//! in a single pass. Elasticsearch additionally gets its topology rewritten
//! to the node-role scheme the target version understands: from
//! [`DATA_TIERS_MIN_VERSION`] on, elements describe roles with
//! `node_roles`; older versions only understand the legacy `node_type`
//! flags.

use semver::Version;
use tracing::debug;

use super::ResourceKind;
use crate::error::{CoreError, Result};
use crate::models::{
    DeploymentCreateRequest, DeploymentPayloadResources, DeploymentUpdateRequest,
    ElasticsearchPayload, StatelessPayload, StatelessPlan,
};

/// First version with data-tier node roles
pub const DATA_TIERS_MIN_VERSION: Version = Version::new(7, 10, 0);

/// Values forced onto a create or update request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadOverrides {
    /// Deployment name, create requests only
    pub name: Option<String>,
    /// Region for resources that do not set one
    pub region: Option<String>,
    /// Stack version for every resource
    pub version: Option<String>,
    /// RefID of the Elasticsearch resource and of every back-reference to it
    pub elasticsearch_ref_id: Option<String>,
    /// Replace non-Elasticsearch RefIDs with `main-<kind>`
    pub override_ref_ids: bool,
    /// Extra built-in plugins enabled on Elasticsearch
    pub builtin_plugins: Vec<String>,
}

impl PayloadOverrides {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_elasticsearch_ref_id(mut self, ref_id: impl Into<String>) -> Self {
        self.elasticsearch_ref_id = Some(ref_id.into());
        self
    }

    #[must_use]
    pub fn with_override_ref_ids(mut self, enabled: bool) -> Self {
        self.override_ref_ids = enabled;
        self
    }

    #[must_use]
    pub fn with_builtin_plugins(mut self, plugins: Vec<String>) -> Self {
        self.builtin_plugins = plugins;
        self
    }

    fn region(&self) -> Option<&str> {
        non_empty(self.region.as_deref())
    }

    fn version(&self) -> Option<&str> {
        non_empty(self.version.as_deref())
    }

    fn elasticsearch_ref_id(&self) -> Option<&str> {
        non_empty(self.elasticsearch_ref_id.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// The request an override pass operates on
#[derive(Debug)]
pub enum CreateOrUpdate<'a> {
    Create(&'a mut DeploymentCreateRequest),
    Update(&'a mut DeploymentUpdateRequest),
}

/// Apply `overrides` to every resource of the request in place
///
/// Fails only when the version override is not a semantic version; the
/// request is left untouched in that case.
pub fn override_create_or_update_request(
    request: CreateOrUpdate<'_>,
    overrides: &PayloadOverrides,
) -> Result<()> {
    let data_tiers = match overrides.version() {
        Some(version) => supports_data_tiers(version)?,
        None => true,
    };

    let resources = match request {
        CreateOrUpdate::Create(req) => {
            if let Some(name) = non_empty(overrides.name.as_deref()) {
                req.name = Some(name.to_string());
            }
            req.resources.as_mut()
        }
        CreateOrUpdate::Update(req) => req.resources.as_mut(),
    };

    let Some(resources) = resources else {
        return Ok(());
    };

    debug!(
        version = ?overrides.version(),
        data_tiers,
        "applying payload overrides"
    );

    apply_to_resources(resources, overrides, data_tiers);
    Ok(())
}

/// True when `version` is at or above [`DATA_TIERS_MIN_VERSION`]
pub fn supports_data_tiers(version: &str) -> Result<bool> {
    let parsed = Version::parse(version).map_err(|source| CoreError::InvalidVersion {
        version: version.to_string(),
        source,
    })?;
    Ok(parsed >= DATA_TIERS_MIN_VERSION)
}

fn apply_to_resources(
    resources: &mut DeploymentPayloadResources,
    overrides: &PayloadOverrides,
    data_tiers: bool,
) {
    for es in &mut resources.elasticsearch {
        apply_elasticsearch(es, overrides, data_tiers);
    }
    apply_stateless(&mut resources.kibana, overrides);
    apply_stateless(&mut resources.apm, overrides);
    apply_stateless(&mut resources.appsearch, overrides);
    apply_stateless(&mut resources.enterprise_search, overrides);
    apply_stateless(&mut resources.integrations_server, overrides);
}

fn apply_elasticsearch(es: &mut ElasticsearchPayload, overrides: &PayloadOverrides, data_tiers: bool) {
    if es.region.is_none()
        && let Some(region) = overrides.region()
    {
        es.region = Some(region.to_string());
    }

    // Other kinds point at this RefID, so it moves together with the back-references
    if let Some(ref_id) = overrides.elasticsearch_ref_id() {
        es.ref_id = ref_id.to_string();
    }

    if let Some(version) = overrides.version() {
        es.plan.elasticsearch.version = Some(version.to_string());
        es.plan
            .elasticsearch
            .enabled_built_in_plugins
            .extend(overrides.builtin_plugins.iter().cloned());
    }

    for element in &mut es.plan.cluster_topology {
        if !element.has_both_role_schemes() {
            continue;
        }
        if data_tiers {
            element.node_type = None;
        } else {
            element.node_roles = None;
        }
    }
}

fn apply_stateless<P: StatelessPlan>(payloads: &mut [StatelessPayload<P>], overrides: &PayloadOverrides) {
    let kind: ResourceKind = P::KIND;
    for payload in payloads {
        if payload.region.is_none()
            && let Some(region) = overrides.region()
        {
            payload.region = Some(region.to_string());
        }

        if overrides.override_ref_ids {
            payload.ref_id = kind.canonical_ref_id().to_string();
        }

        if let Some(ref_id) = overrides.elasticsearch_ref_id() {
            payload.elasticsearch_cluster_ref_id = Some(ref_id.to_string());
        }

        if let Some(version) = overrides.version() {
            payload.plan.configuration_mut().version = Some(version.to_string());
        }
    }
}
