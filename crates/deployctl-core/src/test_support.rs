//! Mock server helpers for unit tests

use serde_json::{Value, json};
use wiremock::MockServer;

use crate::client::DeploymentApi;

pub(crate) const DEPLOYMENT_ID: &str = "f1d329b0fb34470ba8b18361cabdd2bc";

pub(crate) fn api(server: &MockServer) -> DeploymentApi {
    DeploymentApi::builder()
        .host(server.uri())
        .api_key("test-key")
        .build()
        .expect("mock client")
}

pub(crate) fn api_path(path: &str) -> String {
    format!("/api/v1{}", path)
}

pub(crate) fn deployment_path() -> String {
    api_path(&format!("/deployments/{}", DEPLOYMENT_ID))
}

/// A deployment with one Elasticsearch and one Kibana resource
pub(crate) fn deployment_json() -> Value {
    json!({
        "id": DEPLOYMENT_ID,
        "name": "my-deployment",
        "healthy": true,
        "resources": {
            "elasticsearch": [{
                "ref_id": "main-elasticsearch",
                "id": "418017cd1c7f402cbb7a981b2004ceeb",
                "region": "us-east-1",
                "info": {
                    "cluster_id": "418017cd1c7f402cbb7a981b2004ceeb",
                    "cluster_name": "my-deployment",
                    "healthy": true,
                    "status": "started",
                    "plan_info": {
                        "current": {
                            "plan": {
                                "elasticsearch": { "version": "8.11.1" },
                                "cluster_topology": [{
                                    "id": "hot_content",
                                    "zone_count": 2,
                                    "size": { "resource": "memory", "value": 4096 }
                                }]
                            }
                        }
                    }
                }
            }],
            "kibana": [{
                "ref_id": "main-kibana",
                "elasticsearch_cluster_ref_id": "main-elasticsearch",
                "region": "us-east-1",
                "info": {
                    "name": "my-deployment",
                    "status": "started",
                    "plan_info": {
                        "current": {
                            "plan": {
                                "kibana": { "version": "8.11.1" },
                                "cluster_topology": [{
                                    "zone_count": 1,
                                    "size": { "resource": "memory", "value": 1024 }
                                }]
                            }
                        }
                    }
                }
            }]
        }
    })
}
