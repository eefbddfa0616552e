use crate::{ExecutionContext, RoleId};

/// Access-control posture attached to a repository handle.
///
/// The posture is the input of the downstream enforcement layer, not a decision
/// by itself:
///
/// | Posture | Enforcement |
/// |---------|-------------|
/// | `Bypass` | Checks skipped; no role is consulted |
/// | `Enforced { role_id: Some(_) }` | Checks applied with the role's privileges |
/// | `Enforced { role_id: None }` | Checks applied, no privileges (fail closed) |
///
/// A bypass posture carries no role by construction, so a role can never leak into
/// a bypassed handle or be mistaken for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccessPosture {
    /// Trusted automated caller; permission checks are skipped.
    Bypass,
    /// Regular caller; checks apply with the given role, if any.
    Enforced { role_id: Option<RoleId> },
}

impl AccessPosture {
    /// Posture for a caller with no resolvable role.
    #[must_use]
    pub const fn deny_by_default() -> Self {
        Self::Enforced { role_id: None }
    }

    #[must_use]
    pub const fn with_role(role_id: RoleId) -> Self {
        Self::Enforced {
            role_id: Some(role_id),
        }
    }

    #[inline]
    #[must_use]
    pub const fn bypass_checks(&self) -> bool {
        matches!(self, Self::Bypass)
    }

    /// Role to enforce. Always `None` for [`AccessPosture::Bypass`].
    #[inline]
    #[must_use]
    pub const fn role_id(&self) -> Option<RoleId> {
        match self {
            Self::Bypass => None,
            Self::Enforced { role_id } => *role_id,
        }
    }

    /// True when privileged operations may proceed to rule evaluation at all.
    #[must_use]
    pub const fn allows_privileged(&self) -> bool {
        match self {
            Self::Bypass => true,
            Self::Enforced { role_id } => role_id.is_some(),
        }
    }

    /// Posture for a context whose role has already been looked up.
    ///
    /// The looked-up role is ignored for trusted automated callers.
    #[must_use]
    pub fn for_context(ctx: &ExecutionContext, role_id: Option<RoleId>) -> Self {
        if ctx.is_trusted_automated_caller() {
            Self::Bypass
        } else {
            Self::Enforced { role_id }
        }
    }
}

impl Default for AccessPosture {
    fn default() -> Self {
        Self::deny_by_default()
    }
}
