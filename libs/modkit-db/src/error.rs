use modkit_security::TenantId;
use thiserror::Error;

/// Errors surfaced by a [`TenantConnectionProvider`](crate::TenantConnectionProvider).
///
/// Retry and backoff policy belongs to the provider; callers propagate these as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The provider has no capacity left for another connection.
    #[error("connection pool exhausted for tenant {tenant_id}")]
    Exhausted { tenant_id: TenantId },

    /// The tenant's data source cannot be reached.
    #[error("tenant data source unavailable: {0}")]
    Unavailable(String),

    /// The provider returned a handle scoped to a different tenant.
    #[error("connection for tenant {actual} returned when tenant {expected} was requested")]
    TenantMismatch {
        expected: TenantId,
        actual: TenantId,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

/// A string is not a valid logical entity name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidEntityName {
    #[error("entity name is empty")]
    Empty,

    #[error("entity name '{0}' contains unsupported characters")]
    InvalidCharacters(String),
}
