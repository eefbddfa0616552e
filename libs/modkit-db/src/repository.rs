use std::{fmt, marker::PhantomData, sync::Arc};

use modkit_security::{AccessPosture, RoleId, TenantId};

use crate::{EntityName, TenantConnection, TenantConnectionRef};

/// Typed repository handle.
///
/// Bound to exactly one `(tenant, entity, posture)` triple for its lifetime. The
/// binding is never revalidated against the caller's context; a caller whose
/// context changed must obtain a new repository.
///
/// Enforcement layers read [`Repository::posture`]: a bypass posture skips checks,
/// an enforced posture without a role grants no privileges.
pub struct Repository<T> {
    connection: TenantConnectionRef,
    entity_name: EntityName,
    posture: AccessPosture,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            connection: Arc::clone(&self.connection),
            entity_name: self.entity_name.clone(),
            posture: self.posture,
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("tenant_id", &self.connection.tenant_id())
            .field("entity_name", &self.entity_name)
            .field("posture", &self.posture)
            .finish_non_exhaustive()
    }
}

impl<T> Repository<T> {
    pub(crate) fn bind(
        connection: TenantConnectionRef,
        entity_name: EntityName,
        posture: AccessPosture,
    ) -> Self {
        Self {
            connection,
            entity_name,
            posture,
            _entity: PhantomData,
        }
    }

    #[inline]
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        self.connection.tenant_id()
    }

    #[inline]
    #[must_use]
    pub fn entity_name(&self) -> &EntityName {
        &self.entity_name
    }

    #[inline]
    #[must_use]
    pub fn posture(&self) -> AccessPosture {
        self.posture
    }

    #[inline]
    #[must_use]
    pub fn bypass_checks(&self) -> bool {
        self.posture.bypass_checks()
    }

    #[inline]
    #[must_use]
    pub fn role_id(&self) -> Option<RoleId> {
        self.posture.role_id()
    }

    /// Connection the repository executes against.
    #[must_use]
    pub fn connection(&self) -> &dyn TenantConnection {
        self.connection.as_ref()
    }
}
