//! Configuration for the repository resolver.
//!
//! Read from the `orm` section of the application's Figment. A missing section
//! yields defaults.

use figment::Figment;
use modkit_security::{MembershipId, RoleId, TenantId};
use serde::Deserialize;

/// Figment key holding [`OrmConfig`].
pub const CONFIG_KEY: &str = "orm";

/// Configuration error for the repository resolver.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid 'orm' configuration: {0}")]
    Invalid(#[source] Box<figment::Error>),

    #[error("duplicate role assignment for membership {membership_id} in tenant {tenant_id}")]
    DuplicateRoleAssignment {
        membership_id: MembershipId,
        tenant_id: TenantId,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OrmConfig {
    pub naming: NamingConfig,
    pub roles: RolesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Suffix stripped from structural type names before camel-casing.
    pub class_suffix: String,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            class_suffix: "WorkspaceEntity".to_owned(),
        }
    }
}

/// Static membership → role assignments.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RolesConfig {
    pub assignments: Vec<RoleAssignment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoleAssignment {
    pub membership_id: MembershipId,
    pub tenant_id: TenantId,
    pub role_id: RoleId,
}

impl OrmConfig {
    /// Extract the `orm` section, falling back to defaults when it is absent.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the section exists but cannot be deserialized.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        if !figment.contains(CONFIG_KEY) {
            return Ok(Self::default());
        }
        figment
            .extract_inner(CONFIG_KEY)
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }
}
