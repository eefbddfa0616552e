//! Membership role lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use modkit_security::{MembershipId, RoleId, TenantId};
use thiserror::Error;

use crate::config::{ConfigError, RolesConfig};

/// Errors that can occur while looking up a membership's role.
///
/// A membership without a role is not an error; see [`RoleLookup::role_for`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoleLookupError {
    /// The role store cannot be reached.
    #[error("role store unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Resolves the role a membership holds within a tenant.
#[async_trait]
pub trait RoleLookup: Send + Sync {
    /// Role of `membership_id` in `tenant_id`.
    ///
    /// Returns `Ok(None)` when the membership has no role in that tenant
    /// (stale or removed membership, or a membership of another tenant).
    ///
    /// # Errors
    /// Returns `RoleLookupError` when the role store fails.
    async fn role_for(
        &self,
        membership_id: MembershipId,
        tenant_id: TenantId,
    ) -> Result<Option<RoleId>, RoleLookupError>;
}

/// Role lookup backed by configured assignments.
#[derive(Debug, Clone, Default)]
pub struct StaticRoleLookup {
    roles: HashMap<(MembershipId, TenantId), RoleId>,
}

impl StaticRoleLookup {
    /// # Errors
    /// Returns `ConfigError::DuplicateRoleAssignment` if a membership is assigned
    /// twice within the same tenant.
    pub fn from_config(config: &RolesConfig) -> Result<Self, ConfigError> {
        let mut roles = HashMap::with_capacity(config.assignments.len());
        for a in &config.assignments {
            if roles
                .insert((a.membership_id, a.tenant_id), a.role_id)
                .is_some()
            {
                return Err(ConfigError::DuplicateRoleAssignment {
                    membership_id: a.membership_id,
                    tenant_id: a.tenant_id,
                });
            }
        }
        Ok(Self { roles })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

#[async_trait]
impl RoleLookup for StaticRoleLookup {
    async fn role_for(
        &self,
        membership_id: MembershipId,
        tenant_id: TenantId,
    ) -> Result<Option<RoleId>, RoleLookupError> {
        Ok(self.roles.get(&(membership_id, tenant_id)).copied())
    }
}
