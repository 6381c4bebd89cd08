//! End-to-end tests of the deployment operations against a mock API

use deployctl_core::deployments::{
    AddNoteParams, CreateParams, DeleteParams, GetKindParams, GetParams,
    GetRemoteClustersParams, MigrateParams, NotesParams, PayloadOverrides, QueryParams,
    ResourceParams, RestoreParams, ResyncParams, ShutdownParams, UpdateNoteParams, UpdateParams,
    UpdateRemoteClustersParams, add_note, create, delete, get, get_elasticsearch,
    get_remote_clusters, list_notes, migrate, new_update_request, populate_ref_id, restore,
    resync, shutdown, shutdown_resource, update, update_note, update_remote_clusters,
};
use deployctl_core::models::{DeploymentCreateRequest, RemoteResources};
use deployctl_core::{CoreError, DeploymentApi, ResourceKind};
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEPLOYMENT_ID: &str = "320b7b540dfc967a7a649c18e2fce4ed";

fn api(server: &MockServer) -> DeploymentApi {
    DeploymentApi::builder()
        .host(server.uri())
        .api_key("test-key")
        .build()
        .expect("client")
}

fn deployment_path() -> String {
    format!("/api/v1/deployments/{}", DEPLOYMENT_ID)
}

fn fixture() -> Value {
    json!({
        "id": DEPLOYMENT_ID,
        "name": "search-prod",
        "alias": "search-prod",
        "resources": {
            "elasticsearch": [{
                "ref_id": "elasticsearch",
                "region": "gcp-europe-west1",
                "info": {
                    "cluster_name": "search-prod",
                    "plan_info": {
                        "current": {
                            "plan": {
                                "elasticsearch": { "version": "7.9.3" },
                                "cluster_topology": [
                                    {
                                        "id": "hot_content",
                                        "size": { "resource": "memory", "value": 8192 },
                                        "node_type": { "data": true, "master": true },
                                        "node_roles": ["master", "ingest", "remote_cluster_client", "data_hot", "transform", "data_content"]
                                    },
                                    { "id": "ml", "size": { "resource": "memory", "value": 0 } }
                                ]
                            }
                        }
                    },
                    "settings": { "metadata": { "name": "search-prod" } }
                }
            }],
            "kibana": [{
                "ref_id": "kibana",
                "elasticsearch_cluster_ref_id": "elasticsearch",
                "info": {
                    "plan_info": {
                        "current": {
                            "plan": {
                                "kibana": { "version": "7.9.3" },
                                "cluster_topology": [{ "size": { "resource": "memory", "value": 1024 } }]
                            }
                        }
                    }
                }
            }],
            "apm": [{
                "ref_id": "apm",
                "info": { "plan_info": { "pending": { "plan": { "apm": { "version": "7.9.3" } } } } }
            }]
        },
        "settings": { "observability": { "metrics": { "destination": { "deployment_id": "self" } } } }
    })
}

async fn mount_fixture(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(deployment_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn malformed_ids_never_reach_the_network() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;
    let api = api(&server);

    for id in ["", "short", "320b7b540dfc967a7a649c18e2fce4ed0"] {
        let errors: Vec<CoreError> = vec![
            get(&GetParams::new(&api, id)).await.unwrap_err(),
            get_elasticsearch(&GetKindParams::new(&api, id)).await.unwrap_err(),
            update(&UpdateParams::new(&api, id, Default::default())).await.unwrap_err(),
            delete(&DeleteParams::new(&api, id)).await.unwrap_err(),
            shutdown(&ShutdownParams::new(&api, id)).await.unwrap_err(),
            restore(&RestoreParams::new(&api, id)).await.unwrap_err(),
            resync(&ResyncParams::new(&api, id)).await.unwrap_err(),
            migrate(&MigrateParams::new(&api, id, "template")).await.unwrap_err(),
            get_remote_clusters(&GetRemoteClustersParams::new(&api, id)).await.unwrap_err(),
            update_remote_clusters(&UpdateRemoteClustersParams::new(&api, id, RemoteResources::default()))
                .await
                .unwrap_err(),
            shutdown_resource(&ResourceParams::new(&api, id, ResourceKind::Kibana))
                .await
                .unwrap_err(),
            list_notes(&NotesParams::new(&api, id)).await.unwrap_err(),
            add_note(&AddNoteParams::new(&api, id, "hello")).await.unwrap_err(),
            update_note(&UpdateNoteParams::new(&api, id, "1", "hello")).await.unwrap_err(),
            populate_ref_id(&api, id, ResourceKind::Kibana, "").await.unwrap_err(),
        ];

        for err in errors {
            assert!(err.is_validation(), "expected validation error, got {err}");
            assert!(
                err.to_string().contains(&format!("id {:?} is invalid", id)),
                "unexpected message: {err}"
            );
        }
    }
}

#[tokio::test]
async fn populated_ref_id_is_returned_without_request() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = api(&server);
    // even an invalid deployment id is fine when nothing needs discovering
    let ref_id = populate_ref_id(&api, "whatever", ResourceKind::Apm, "my-apm").await.unwrap();
    assert_eq!(ref_id, "my-apm");
}

#[tokio::test]
async fn ref_id_discovery_uses_minimal_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(deployment_path()))
        .and(query_param("show_plans", "false"))
        .and(query_param("show_plan_defaults", "false"))
        .and(query_param("show_plan_history", "false"))
        .and(query_param("show_plan_logs", "false"))
        .and(query_param("show_metadata", "false"))
        .and(query_param("show_settings", "false"))
        .and(query_param("convert_legacy_plans", "false"))
        .and(query_param("enrich_with_template", "false"))
        .and(query_param("show_system_alerts", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);
    let ref_id = populate_ref_id(&api, DEPLOYMENT_ID, ResourceKind::Elasticsearch, "")
        .await
        .unwrap();
    assert_eq!(ref_id, "elasticsearch");
}

#[tokio::test]
async fn discovery_failure_stops_the_primary_call() {
    let server = MockServer::start().await;
    mount_fixture(&server).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&server)
        .await;

    let api = api(&server);
    let err = shutdown_resource(&ResourceParams::new(&api, DEPLOYMENT_ID, ResourceKind::EnterpriseSearch))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::ResourceKindUnavailable { .. }));
}

#[tokio::test]
async fn translated_update_drops_unsized_topology_and_pending_only_resources() {
    let server = MockServer::start().await;
    mount_fixture(&server).await;

    let api = api(&server);
    let deployment = get(&GetParams::new(&api, DEPLOYMENT_ID).with_query(QueryParams::for_update()))
        .await
        .unwrap();
    let request = new_update_request(Some(&deployment)).unwrap();
    let resources = request.resources.as_ref().unwrap();

    assert_eq!(request.prune_orphans, Some(false));
    assert!(resources.apm.is_empty());
    assert_eq!(resources.kibana.len(), 1);

    let body = serde_json::to_value(&request).unwrap();
    for element in body["resources"]["elasticsearch"][0]["plan"]["cluster_topology"]
        .as_array()
        .unwrap()
    {
        assert!(element["size"]["value"].as_i64().unwrap_or(0) > 0);
    }
    assert!(
        body["resources"]["elasticsearch"][0]["settings"]
            .get("metadata")
            .is_none()
    );
    assert_eq!(
        body["settings"]["observability"]["metrics"]["destination"]["deployment_id"],
        "self"
    );
}

#[tokio::test]
async fn update_with_legacy_version_keeps_node_type() {
    let server = MockServer::start().await;
    mount_fixture(&server).await;
    Mock::given(method("PUT"))
        .and(path(deployment_path()))
        .and(body_partial_json(json!({
            "resources": {
                "elasticsearch": [{
                    "plan": {
                        "elasticsearch": { "version": "7.4.1" },
                        "cluster_topology": [{ "id": "hot_content", "node_type": { "data": true } }]
                    }
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": DEPLOYMENT_ID,
            "name": "search-prod",
            "resources": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);
    let deployment = get(&GetParams::new(&api, DEPLOYMENT_ID).with_query(QueryParams::for_update()))
        .await
        .unwrap();

    let request = new_update_request(Some(&deployment)).unwrap();
    let element = &request.resources.as_ref().unwrap().elasticsearch[0].plan.cluster_topology[0];
    assert!(element.has_both_role_schemes());

    let params = UpdateParams::new(&api, DEPLOYMENT_ID, request)
        .with_overrides(PayloadOverrides::new().with_version("7.4.1"));
    update(&params).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let put = received
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("update request");
    let body: Value = serde_json::from_slice(&put.body).unwrap();
    assert!(
        body["resources"]["elasticsearch"][0]["plan"]["cluster_topology"][0]
            .get("node_roles")
            .is_none()
    );
}

#[tokio::test]
async fn update_overrides_without_version_send_data_tiers() {
    let server = MockServer::start().await;
    mount_fixture(&server).await;
    Mock::given(method("PUT"))
        .and(path(deployment_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": DEPLOYMENT_ID,
            "name": "search-prod",
            "resources": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = api(&server);
    let deployment = get(&GetParams::new(&api, DEPLOYMENT_ID).with_query(QueryParams::for_update()))
        .await
        .unwrap();
    let request = new_update_request(Some(&deployment)).unwrap();
    let params = UpdateParams::new(&api, DEPLOYMENT_ID, request).with_overrides(PayloadOverrides::new());
    update(&params).await.unwrap();

    let received = server.received_requests().await.unwrap();
    let put = received
        .iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("update request");
    let body: Value = serde_json::from_slice(&put.body).unwrap();
    let element = &body["resources"]["elasticsearch"][0]["plan"]["cluster_topology"][0];
    assert!(element.get("node_type").is_none());
    assert!(element["node_roles"].as_array().is_some_and(|roles| !roles.is_empty()));
}

#[tokio::test]
async fn create_reports_api_error_codes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/deployments"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "errors": [
                { "code": "deployments.deployment_exists", "message": "already exists", "fields": ["request_id"] }
            ]
        })))
        .mount(&server)
        .await;

    let api = api(&server);
    let err = create(&CreateParams::new(&api, DeploymentCreateRequest::default()).with_request_id("tok"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(
        err.to_string(),
        "api error (409 Conflict): deployments.deployment_exists: already exists"
    );
}

#[tokio::test]
async fn missing_api_is_reported_first() {
    let err = delete(&DeleteParams {
        api: None,
        deployment_id: "bad".to_string(),
    })
    .await
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "deployment delete: 2 errors occurred:\n\
         \t* api reference is required for the operation\n\
         \t* id \"bad\" is invalid"
    );
}
