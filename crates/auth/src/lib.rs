//! `pme360-auth` — closed role/permission model and pure policy checks.
//!
//! This crate is intentionally decoupled from storage and from the bus;
//! resolving *which* role is current is the session crate's job.

pub mod authorize;
pub mod permissions;
pub mod policy;
pub mod roles;

pub use authorize::{
    AuthorizationExplanation, AuthzError, DenialReason, RbacRegistry, authorize,
    explain_authorization,
};
pub use permissions::Permission;
pub use policy::{PermissionSet, can, permissions_for};
pub use roles::Role;
