//! Build an update request from a fetched deployment
//!
//! The update endpoint wants the complete desired state. Starting from a
//! `GET` reply, every resource with a current plan is turned back into a
//! write payload: read-only metadata is dropped and topology elements that
//! only describe server defaults are filtered out.

use tracing::debug;

use crate::models::{
    DeploymentGetResponse, DeploymentPayloadResources, DeploymentUpdateRequest,
    DeploymentUpdateSettings, ElasticsearchPayload, ElasticsearchResourceInfo, StatelessPayload,
    StatelessPlan, StatelessResourceInfo, TopologyElement, TopologySize,
};

use super::ResourceKind;

/// Translate a deployment into the request that would keep it unchanged
///
/// Returns `None` when there is no deployment. Resources without a current
/// plan are left out. Orphan pruning is disabled so kinds missing from the
/// request are not deleted.
#[must_use]
pub fn new_update_request(deployment: Option<&DeploymentGetResponse>) -> Option<DeploymentUpdateRequest> {
    let deployment = deployment?;
    let resources = &deployment.resources;

    let elasticsearch: Vec<ElasticsearchPayload> = resources
        .elasticsearch
        .iter()
        .filter_map(elasticsearch_payload)
        .collect();

    // Other kinds point back at the Elasticsearch resource by RefID
    let es_ref_id = elasticsearch.last().map(|es| es.ref_id.clone());

    let payloads = DeploymentPayloadResources {
        kibana: stateless_payloads(&resources.kibana, es_ref_id.as_deref()),
        apm: stateless_payloads(&resources.apm, es_ref_id.as_deref()),
        appsearch: stateless_payloads(&resources.appsearch, es_ref_id.as_deref()),
        enterprise_search: stateless_payloads(&resources.enterprise_search, es_ref_id.as_deref()),
        integrations_server: stateless_payloads(&resources.integrations_server, es_ref_id.as_deref()),
        elasticsearch,
    };

    let settings = deployment
        .settings
        .as_ref()
        .and_then(|s| s.observability.clone())
        .map(|observability| DeploymentUpdateSettings {
            observability: Some(observability),
        });

    debug!(
        deployment_id = %deployment.id,
        elasticsearch = payloads.elasticsearch.len(),
        kibana = payloads.kibana.len(),
        "translated deployment into update request"
    );

    Some(DeploymentUpdateRequest {
        name: Some(deployment.name.clone()),
        alias: deployment.alias.clone(),
        prune_orphans: Some(false),
        resources: Some(payloads),
        settings,
        metadata: None,
    })
}

fn elasticsearch_payload(resource: &ElasticsearchResourceInfo) -> Option<ElasticsearchPayload> {
    let mut plan = resource.info.plan_info.current_plan()?.clone();

    // Both role schemes are kept; the override engine picks one per version
    plan.cluster_topology.retain(|element| element.is_sized());

    Some(ElasticsearchPayload {
        ref_id: resource.ref_id.clone(),
        region: resource.region.clone(),
        display_name: resource.info.cluster_name.clone(),
        plan,
        settings: resource.info.settings.as_ref().map(|s| s.without_metadata()),
    })
}

fn stateless_payloads<P: StatelessPlan>(
    resources: &[StatelessResourceInfo<P>],
    es_ref_id: Option<&str>,
) -> Vec<StatelessPayload<P>> {
    resources
        .iter()
        .filter_map(|resource| {
            let mut plan = resource.info.plan_info.current_plan()?.clone();
            plan.cluster_topology_mut()
                .retain(|element| is_sized(P::KIND, element));

            Some(StatelessPayload {
                elasticsearch_cluster_ref_id: es_ref_id
                    .map(str::to_string)
                    .or_else(|| resource.elasticsearch_cluster_ref_id.clone()),
                ref_id: resource.ref_id.clone(),
                region: resource.region.clone(),
                display_name: resource.info.name.clone(),
                plan,
                settings: resource.info.settings.as_ref().map(|s| s.without_metadata()),
            })
        })
        .collect()
}

/// Kibana still honours legacy `memory_per_node`; the other kinds only `size`
fn is_sized(kind: ResourceKind, element: &TopologyElement) -> bool {
    let legacy = kind == ResourceKind::Kibana && element.memory_per_node.is_some_and(|m| m > 0);
    legacy || TopologySize::is_positive(element.size.as_ref())
}
