//! Tenant connection contracts.
//!
//! The data layer never creates tenant connections itself. A
//! [`TenantConnectionProvider`] owns their whole lifecycle (creation, pooling,
//! eviction, concurrency across tenants) and hands out shared handles:
//!
//! ```ignore
//! let conn = provider.connection_for(tenant_id).await?;
//! let people: Repository<Person> = conn.repository_for(entity_name, posture);
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use modkit_security::{AccessPosture, TenantId};

use crate::{ConnectionError, EntityName, Repository};

/// Live, tenant-scoped data-access handle.
///
/// Owned by the provider. Holders must not cache it beyond the operation that
/// requested it.
///
/// Implementors only report their tenant. Repositories are bound on top of the
/// shared handle by [`TenantConnectionExt::repository_for`], which is
/// implemented once for every [`TenantConnectionRef`] and cannot be overridden
/// per connection.
pub trait TenantConnection: Send + Sync + std::fmt::Debug {
    /// Tenant this connection is scoped to.
    fn tenant_id(&self) -> TenantId;
}

/// Shared handle to a tenant connection.
pub type TenantConnectionRef = Arc<dyn TenantConnection>;

/// Source of tenant connections.
///
/// The first call for a tenant may be slow (cold connection); later calls are
/// expected to be served from the provider's own cache.
#[async_trait]
pub trait TenantConnectionProvider: Send + Sync {
    /// Get the connection for `tenant_id`.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` when no connection can be handed out
    /// (pool exhausted, data source down, ...).
    async fn connection_for(&self, tenant_id: TenantId)
    -> Result<TenantConnectionRef, ConnectionError>;
}

#[async_trait]
impl<P: TenantConnectionProvider + ?Sized> TenantConnectionProvider for Arc<P> {
    async fn connection_for(
        &self,
        tenant_id: TenantId,
    ) -> Result<TenantConnectionRef, ConnectionError> {
        (**self).connection_for(tenant_id).await
    }
}

/// Repository production on top of a shared tenant connection.
pub trait TenantConnectionExt {
    /// Produce a repository for `entity_name` tagged with `posture`.
    fn repository_for<T>(&self, entity_name: EntityName, posture: AccessPosture) -> Repository<T>;
}

impl TenantConnectionExt for TenantConnectionRef {
    fn repository_for<T>(&self, entity_name: EntityName, posture: AccessPosture) -> Repository<T> {
        tracing::trace!(
            tenant_id = %self.tenant_id(),
            entity = %entity_name,
            bypass_checks = posture.bypass_checks(),
            "binding repository"
        );
        Repository::bind(Arc::clone(self), entity_name, posture)
    }
}
