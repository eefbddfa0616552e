//! Error types for repository resolution.

use modkit_db::ConnectionError;
use thiserror::Error;

use crate::naming::EntityNameError;
use crate::role::RoleLookupError;

/// Why a repository or tenant connection could not be resolved.
///
/// Every variant is a hard stop for the current call. The variants separate
/// "no tenant" from "unknown entity" from downstream infrastructure failures so
/// the embedding layer can map them to distinct responses.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The caller's context has no active tenant.
    #[error("tenant not resolved: no active tenant in the execution context")]
    TenantNotResolved,

    /// The entity reference has no logical entity name.
    #[error("entity not recognized: {0}")]
    EntityNotRecognized(#[from] EntityNameError),

    #[error("role lookup failed: {0}")]
    RoleLookupFailed(#[from] RoleLookupError),

    #[error("connection unavailable: {0}")]
    ConnectionUnavailable(#[from] ConnectionError),
}

impl ResolveError {
    /// True for failures raised by collaborators rather than by the request itself.
    #[must_use]
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Self::RoleLookupFailed(_) | Self::ConnectionUnavailable(_)
        )
    }
}
