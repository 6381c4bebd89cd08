//! # deployctl-core
//!
//! Typed client for a cloud deployments REST API.
//!
//! Each operation in [`deployments`] takes a params struct, validates it
//! before touching the network, optionally discovers a missing RefID,
//! shapes the payload and issues a single request through
//! [`DeploymentApi`].
//!
//! Two pieces carry real logic beyond request plumbing:
//!
//! - [`deployments::overrides`] forces region, version, RefIDs and plugins
//!   onto a create or update payload, rewriting Elasticsearch topology to
//!   the node-role scheme the target version understands.
//! - [`deployments::update_request`] turns a fetched deployment into the
//!   full-state update request the API expects.
//!
//! ```rust,ignore
//! use deployctl_core::DeploymentApi;
//! use deployctl_core::deployments::{
//!     GetParams, QueryParams, UpdateParams, get, new_update_request, update,
//! };
//!
//! let api = DeploymentApi::builder().api_key(key).build()?;
//! let current = get(&GetParams::new(&api, id).with_query(QueryParams::for_update())).await?;
//! if let Some(request) = new_update_request(Some(&current)) {
//!     update(&UpdateParams::new(&api, id, request)).await?;
//! }
//! ```

pub mod client;
pub mod config;
pub mod deployments;
pub mod error;
pub mod models;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use client::{ApiResponse, DeploymentApi, DeploymentApiBuilder, ResourceHeaders};
pub use deployments::ResourceKind;
pub use error::{ApiError, ApiErrorElement, CoreError, Result};
pub use validate::{MultiError, Violation};
