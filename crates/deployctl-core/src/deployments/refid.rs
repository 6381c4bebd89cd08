//! RefID discovery for callers that omit it
//!
//! Resource endpoints are addressed by `{kind}/{ref_id}`. When the caller
//! leaves the RefID empty, one extra "get deployment" round trip with every
//! detail flag disabled finds the RefID of the resource of that kind.
//!
//! Resolution returns the RefID instead of writing through a caller-owned
//! slot, so concurrent resolutions never share state.

use reqwest::Method;
use tracing::{debug, warn};

use super::{QueryParams, ResourceKind, SYSTEM_ALERTS, deployment_path};
use crate::client::DeploymentApi;
use crate::error::{CoreError, Result};
use crate::models::{DeploymentGetResponse, DeploymentResources};
use crate::validate::MultiError;

/// Resolve the RefID of the `kind` resource in a deployment
///
/// A non-empty `ref_id` is returned as is without any request.
pub async fn populate_ref_id(
    api: &DeploymentApi,
    deployment_id: &str,
    kind: ResourceKind,
    ref_id: &str,
) -> Result<String> {
    if !ref_id.is_empty() {
        return Ok(ref_id.to_string());
    }

    let mut merr = MultiError::new("deployment ref id discovery");
    merr.check_deployment_id(deployment_id);
    merr.into_result()?;

    debug!(deployment_id, %kind, "discovering resource ref id");

    let mut query = QueryParams::default().pairs();
    query.push(("enrich_with_template", false.to_string()));
    query.push(("show_system_alerts", SYSTEM_ALERTS.to_string()));

    let request = api
        .request(Method::GET, &deployment_path(deployment_id))
        .query(&query);
    let deployment: DeploymentGetResponse = api.send_body(request).await?;

    find_ref_id(&deployment.resources, kind).ok_or_else(|| CoreError::ResourceKindUnavailable {
        kind: kind.to_string(),
    })
}

/// RefID of the last resource of `kind`, if any
pub(crate) fn find_ref_id(resources: &DeploymentResources, kind: ResourceKind) -> Option<String> {
    let ref_ids: Vec<&str> = match kind {
        ResourceKind::Elasticsearch => resources.elasticsearch.iter().map(|r| r.ref_id.as_str()).collect(),
        ResourceKind::Kibana => resources.kibana.iter().map(|r| r.ref_id.as_str()).collect(),
        ResourceKind::Apm => resources.apm.iter().map(|r| r.ref_id.as_str()).collect(),
        ResourceKind::AppSearch => resources.appsearch.iter().map(|r| r.ref_id.as_str()).collect(),
        ResourceKind::EnterpriseSearch => resources
            .enterprise_search
            .iter()
            .map(|r| r.ref_id.as_str())
            .collect(),
        ResourceKind::IntegrationsServer => resources
            .integrations_server
            .iter()
            .map(|r| r.ref_id.as_str())
            .collect(),
    };

    if ref_ids.len() > 1 {
        warn!(
            %kind,
            candidates = ?ref_ids,
            "deployment has more than one resource of this kind, using the last one"
        );
    }

    ref_ids.last().map(|id| id.to_string())
}
