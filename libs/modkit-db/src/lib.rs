#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! `ModKit` tenant data-access contracts.
//!
//! This crate defines what the data layer needs from the component that owns
//! per-tenant connections, and the typed [`Repository`] handle it produces:
//!
//! - [`TenantConnectionProvider`]: tenant id → shared [`TenantConnection`]
//! - [`TenantConnectionExt::repository_for`]: connection → `Repository<T>`
//!   tagged with an [`AccessPosture`](modkit_security::AccessPosture)
//! - [`EntityName`]: validated logical entity name used by the storage layer
//!
//! Connection creation, pooling and eviction are the provider's concern and are
//! not implemented here.

pub mod connection;
pub mod entity;
pub mod error;
pub mod repository;

pub use connection::{
    TenantConnection, TenantConnectionExt, TenantConnectionProvider, TenantConnectionRef,
};
pub use entity::EntityName;
pub use error::{ConnectionError, InvalidEntityName};
pub use repository::Repository;
