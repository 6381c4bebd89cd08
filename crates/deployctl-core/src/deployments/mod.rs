//! Deployment operations
//!
//! Every operation follows the same protocol: validate its params, resolve
//! an omitted RefID when the endpoint needs one, shape the payload, then
//! issue exactly one API call and return the decoded reply.
//!
//! ```rust,ignore
//! use deployctl_core::DeploymentApi;
//! use deployctl_core::deployments::{GetParams, get};
//!
//! let api = DeploymentApi::builder().api_key(key).build()?;
//! let deployment = get(&GetParams::new(&api, deployment_id)).await?;
//! println!("{} has {} clusters", deployment.name, deployment.resources.elasticsearch.len());
//! ```

mod create;
mod get;
mod kind;
mod lifecycle;
mod migrate;
mod notes;
pub mod overrides;
pub mod refid;
mod remote_clusters;
mod resource;
mod resync;
mod search;
mod update;
pub mod update_request;

pub use create::*;
pub use get::*;
pub use kind::ResourceKind;
pub use lifecycle::*;
pub use migrate::*;
pub use notes::*;
pub use overrides::{CreateOrUpdate, DATA_TIERS_MIN_VERSION, PayloadOverrides, override_create_or_update_request};
pub use refid::populate_ref_id;
pub use remote_clusters::*;
pub use resource::*;
pub use resync::*;
pub use search::*;
pub use update::*;
pub use update_request::new_update_request;

use crate::client::DeploymentApi;
use crate::error::Result;
use crate::validate::{MultiError, Violation};

/// Number of system alerts requested with a deployment
pub const SYSTEM_ALERTS: i64 = 5;

/// Optional detail flags of the "get" endpoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub show_plans: bool,
    pub show_plan_defaults: bool,
    pub show_plan_history: bool,
    pub show_plan_logs: bool,
    pub show_metadata: bool,
    pub show_settings: bool,
    pub convert_legacy_plans: bool,
}

impl QueryParams {
    /// Flags needed to round-trip a deployment through an update
    #[must_use]
    pub fn for_update() -> Self {
        Self {
            show_plans: true,
            show_settings: true,
            ..Default::default()
        }
    }

    pub(crate) fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("show_plans", self.show_plans.to_string()),
            ("show_plan_defaults", self.show_plan_defaults.to_string()),
            ("show_plan_history", self.show_plan_history.to_string()),
            ("show_plan_logs", self.show_plan_logs.to_string()),
            ("show_metadata", self.show_metadata.to_string()),
            ("show_settings", self.show_settings.to_string()),
            ("convert_legacy_plans", self.convert_legacy_plans.to_string()),
        ]
    }
}

/// Handle checked by `validate()`; a missing one reports the same violation
pub(crate) fn require_api<'a>(api: Option<&'a DeploymentApi>, operation: &str) -> Result<&'a DeploymentApi> {
    api.ok_or_else(|| {
        let mut merr = MultiError::new(operation);
        merr.push(Violation::MissingApi);
        merr.into()
    })
}

/// `/deployments/{id}`
pub(crate) fn deployment_path(deployment_id: &str) -> String {
    format!("/deployments/{}", crate::client::segment(deployment_id))
}

/// `/deployments/{id}/{kind}/{ref_id}`
pub(crate) fn resource_path(deployment_id: &str, kind: ResourceKind, ref_id: &str) -> String {
    format!(
        "{}/{}/{}",
        deployment_path(deployment_id),
        kind.as_str(),
        crate::client::segment(ref_id)
    )
}
