#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `ModKit` workspace-scoped repository resolver.
//!
//! Given the caller's [`ExecutionContext`](modkit_security::ExecutionContext), the
//! [`RepositoryResolver`] decides which tenant connection to use, which
//! [`AccessPosture`](modkit_security::AccessPosture) applies, and hands back a typed
//! [`Repository`](modkit_db::Repository) bound to both.
//!
//! # Posture
//!
//! | Caller | Role lookup | Posture |
//! |--------|-------------|---------|
//! | Trusted automated | skipped | `Bypass` |
//! | Membership with role | performed | `Enforced { Some(role) }` |
//! | Membership without role | performed | `Enforced { None }` |
//! | No membership | skipped | `Enforced { None }` |
//!
//! A context without a tenant never yields a repository or a connection.

pub mod config;
pub mod entity;
pub mod error;
pub mod naming;
pub mod resolver;
pub mod role;

pub use config::{ConfigError, NamingConfig, OrmConfig, RoleAssignment, RolesConfig};
pub use entity::{EntityRef, WorkspaceEntity};
pub use error::ResolveError;
pub use naming::{ClassNameNormalizer, EntityNameError, EntityNameNormalizer};
pub use resolver::RepositoryResolver;
pub use role::{RoleLookup, RoleLookupError, StaticRoleLookup};
