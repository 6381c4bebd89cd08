//! Wire models for the deployments API
//!
//! Only the fields the client logic reads or rewrites are typed. Everything
//! else is carried through `extra` maps so a fetched plan can be sent back
//! without losing data.

pub mod common;
pub mod deployment;
pub mod elasticsearch;
pub mod extras;
pub mod stateless;

pub use common::*;
pub use deployment::*;
pub use elasticsearch::*;
pub use extras::*;
pub use stateless::*;
