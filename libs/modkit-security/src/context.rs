use uuid::Uuid;

/// Identifier of a tenant (workspace).
pub type TenantId = Uuid;

/// Identifier of a caller's membership in a tenant.
///
/// Only meaningful together with the [`TenantId`] it was resolved under.
pub type MembershipId = Uuid;

/// Identifier of a role held by a membership within a tenant.
pub type RoleId = Uuid;

/// `ExecutionContext` describes who is calling and on behalf of which tenant.
///
/// It is produced once per call by a [`ContextResolver`] and is immutable for the
/// duration of that call. A context without a tenant is valid: the caller is simply
/// outside any tenant scope.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ExecutionContext {
    tenant_id: Option<TenantId>,
    caller_membership_id: Option<MembershipId>,
    is_trusted_automated_caller: bool,
}

impl ExecutionContext {
    /// Create a new `ExecutionContext` builder
    #[must_use]
    pub fn builder() -> ExecutionContextBuilder {
        ExecutionContextBuilder::default()
    }

    /// Create an anonymous `ExecutionContext` with no tenant and no membership
    #[must_use]
    pub fn anonymous() -> Self {
        ExecutionContextBuilder::default().build()
    }

    /// Get the active tenant, if any
    #[must_use]
    pub fn tenant_id(&self) -> Option<TenantId> {
        self.tenant_id
    }

    /// Get the caller's membership in the active tenant, if any
    #[must_use]
    pub fn caller_membership_id(&self) -> Option<MembershipId> {
        self.caller_membership_id
    }

    /// True for automated callers (e.g. API-key integrations) that are exempt
    /// from per-role enforcement.
    #[must_use]
    pub fn is_trusted_automated_caller(&self) -> bool {
        self.is_trusted_automated_caller
    }
}

#[derive(Default)]
pub struct ExecutionContextBuilder {
    tenant_id: Option<TenantId>,
    caller_membership_id: Option<MembershipId>,
    is_trusted_automated_caller: bool,
}

impl ExecutionContextBuilder {
    #[must_use]
    pub fn tenant_id(mut self, tenant_id: TenantId) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    #[must_use]
    pub fn caller_membership_id(mut self, membership_id: MembershipId) -> Self {
        self.caller_membership_id = Some(membership_id);
        self
    }

    #[must_use]
    pub fn trusted_automated_caller(mut self, trusted: bool) -> Self {
        self.is_trusted_automated_caller = trusted;
        self
    }

    #[must_use]
    pub fn build(self) -> ExecutionContext {
        ExecutionContext {
            tenant_id: self.tenant_id,
            caller_membership_id: self.caller_membership_id,
            is_trusted_automated_caller: self.is_trusted_automated_caller,
        }
    }
}

/// Per-call source of the ambient [`ExecutionContext`].
///
/// Implementations must be cheap to call repeatedly and must reflect the identity of
/// the current caller, never a process-wide cached value. Callers hand the resolver
/// explicitly to every data-access operation.
pub trait ContextResolver: Send + Sync {
    fn current_context(&self) -> ExecutionContext;
}

impl ContextResolver for ExecutionContext {
    fn current_context(&self) -> ExecutionContext {
        self.clone()
    }
}

impl<T: ContextResolver + ?Sized> ContextResolver for std::sync::Arc<T> {
    fn current_context(&self) -> ExecutionContext {
        (**self).current_context()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_execution_context_builder_full() {
        let tenant_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let membership_id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap();

        let ctx = ExecutionContext::builder()
            .tenant_id(tenant_id)
            .caller_membership_id(membership_id)
            .trusted_automated_caller(true)
            .build();

        assert_eq!(ctx.tenant_id(), Some(tenant_id));
        assert_eq!(ctx.caller_membership_id(), Some(membership_id));
        assert!(ctx.is_trusted_automated_caller());
    }

    #[test]
    fn test_execution_context_anonymous() {
        let ctx = ExecutionContext::anonymous();

        assert_eq!(ctx.tenant_id(), None);
        assert_eq!(ctx.caller_membership_id(), None);
        assert!(!ctx.is_trusted_automated_caller());
        assert_eq!(ctx, ExecutionContext::default());
    }

    #[test]
    fn test_execution_context_tenant_without_membership() {
        let tenant_id = Uuid::new_v4();

        let ctx = ExecutionContext::builder().tenant_id(tenant_id).build();

        assert_eq!(ctx.tenant_id(), Some(tenant_id));
        assert_eq!(ctx.caller_membership_id(), None);
    }

    #[test]
    fn test_context_resolver_returns_fresh_copy() {
        let ctx = ExecutionContext::builder().tenant_id(Uuid::new_v4()).build();
        let shared = std::sync::Arc::new(ctx.clone());

        assert_eq!(ctx.current_context(), ctx);
        assert_eq!(shared.current_context(), ctx);
    }

    #[test]
    fn test_execution_context_serialize_deserialize() {
        let original = ExecutionContext::builder()
            .tenant_id(Uuid::new_v4())
            .caller_membership_id(Uuid::new_v4())
            .build();

        let serialized = serde_json::to_string(&original).unwrap();
        let deserialized: ExecutionContext = serde_json::from_str(&serialized).unwrap();

        assert_eq!(deserialized, original);
    }
}
