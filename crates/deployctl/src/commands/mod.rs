pub mod deployment;
pub mod profile;
