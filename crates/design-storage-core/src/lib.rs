//! Design Storage Core — domain models, the permission policy, resource
//! scoping and repository traits shared by every crate in the workspace.

pub mod error;
pub mod models;
pub mod permission;
pub mod repository;
pub mod scope;

pub use error::{DesignError, DesignResult};
pub use permission::{Caller, ClaimMap, PermissionLevel};
pub use scope::ResourceScope;
