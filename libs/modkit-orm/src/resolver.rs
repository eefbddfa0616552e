//! Workspace-scoped repository resolution.

use std::sync::Arc;

use modkit_db::{
    ConnectionError, EntityName, Repository, TenantConnectionExt, TenantConnectionProvider,
    TenantConnectionRef,
};
use modkit_security::{AccessPosture, ContextResolver, ExecutionContext, TenantId};
use tracing::{Span, debug, field, instrument, warn};

use crate::config::{ConfigError, OrmConfig};
use crate::entity::{EntityRef, WorkspaceEntity};
use crate::error::ResolveError;
use crate::naming::{ClassNameNormalizer, EntityNameError, EntityNameNormalizer};
use crate::role::{RoleLookup, StaticRoleLookup};

/// Resolves repositories and tenant connections for the caller in context.
///
/// The resolver is stateless: it holds its collaborators and nothing else, reads
/// the context afresh on every call and memoizes nothing. Each resolution makes
/// at most one role lookup, followed by exactly one connection request.
///
/// ```ignore
/// let resolver = RepositoryResolver::new(normalizer, role_lookup, provider);
///
/// let people = resolver.resolve_entity::<PersonWorkspaceEntity>(&ctx).await?;
/// let notes = resolver.resolve::<Note>(&ctx, "note").await?;
/// ```
#[derive(Clone)]
pub struct RepositoryResolver {
    normalizer: Arc<dyn EntityNameNormalizer>,
    role_lookup: Arc<dyn RoleLookup>,
    connections: Arc<dyn TenantConnectionProvider>,
}

impl RepositoryResolver {
    #[must_use]
    pub fn new(
        normalizer: Arc<dyn EntityNameNormalizer>,
        role_lookup: Arc<dyn RoleLookup>,
        connections: Arc<dyn TenantConnectionProvider>,
    ) -> Self {
        Self {
            normalizer,
            role_lookup,
            connections,
        }
    }

    /// Build a resolver using the class-name normalizer and the statically
    /// configured role assignments.
    ///
    /// # Errors
    /// Returns `ConfigError` if the role assignments are inconsistent.
    pub fn from_config(
        config: &OrmConfig,
        connections: Arc<dyn TenantConnectionProvider>,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(
            Arc::new(ClassNameNormalizer::from_config(&config.naming)),
            Arc::new(StaticRoleLookup::from_config(&config.roles)?),
            connections,
        ))
    }

    /// Resolve a repository for the entity mapped by `T`.
    ///
    /// # Errors
    /// See [`RepositoryResolver::resolve`].
    pub async fn resolve_entity<T: WorkspaceEntity>(
        &self,
        ctx: &(impl ContextResolver + ?Sized),
    ) -> Result<Repository<T>, ResolveError> {
        self.resolve(ctx, EntityRef::of::<T>()).await
    }

    /// Resolve a repository for `entity`, scoped to the caller's tenant and tagged
    /// with the caller's access posture.
    ///
    /// # Errors
    /// - `TenantNotResolved` if the context has no active tenant
    /// - `EntityNotRecognized` if `entity` has no logical entity name
    /// - `RoleLookupFailed` / `ConnectionUnavailable` as reported by the collaborators
    #[instrument(skip_all, fields(tenant_id = field::Empty, entity = field::Empty))]
    pub async fn resolve<T>(
        &self,
        ctx: &(impl ContextResolver + ?Sized),
        entity: impl Into<EntityRef>,
    ) -> Result<Repository<T>, ResolveError> {
        let context = ctx.current_context();
        let tenant_id = require_tenant(&context)?;

        let entity_name = self.entity_name(entity.into())?;
        Span::current().record("entity", field::display(&entity_name));

        let posture = self.posture_for(&context, tenant_id).await?;
        let connection = self.connection_for(tenant_id).await?;

        debug!(
            bypass_checks = posture.bypass_checks(),
            has_role = posture.role_id().is_some(),
            "repository resolved"
        );
        Ok(connection.repository_for(entity_name, posture))
    }

    /// Resolve the caller's tenant connection without binding an entity.
    ///
    /// # Errors
    /// - `TenantNotResolved` if the context has no active tenant
    /// - `ConnectionUnavailable` as reported by the provider
    #[instrument(skip_all, fields(tenant_id = field::Empty))]
    pub async fn resolve_tenant_connection(
        &self,
        ctx: &(impl ContextResolver + ?Sized),
    ) -> Result<TenantConnectionRef, ResolveError> {
        let context = ctx.current_context();
        let tenant_id = require_tenant(&context)?;
        self.connection_for(tenant_id).await
    }

    /// Compute the caller's access posture in the active tenant without acquiring
    /// a connection.
    ///
    /// # Errors
    /// - `TenantNotResolved` if the context has no active tenant
    /// - `RoleLookupFailed` as reported by the role lookup
    #[instrument(skip_all, fields(tenant_id = field::Empty))]
    pub async fn resolve_posture(
        &self,
        ctx: &(impl ContextResolver + ?Sized),
    ) -> Result<AccessPosture, ResolveError> {
        let context = ctx.current_context();
        let tenant_id = require_tenant(&context)?;
        self.posture_for(&context, tenant_id).await
    }

    fn entity_name(&self, entity: EntityRef) -> Result<EntityName, ResolveError> {
        let name = match entity {
            EntityRef::Type(type_name) => self.normalizer.normalize(type_name),
            EntityRef::Name(name) => EntityName::new(name).map_err(EntityNameError::from),
        };
        name.map_err(|e| {
            warn!(error = %e, "entity reference not recognized");
            ResolveError::from(e)
        })
    }

    async fn posture_for(
        &self,
        context: &ExecutionContext,
        tenant_id: TenantId,
    ) -> Result<AccessPosture, ResolveError> {
        if context.is_trusted_automated_caller() {
            return Ok(AccessPosture::Bypass);
        }

        let Some(membership_id) = context.caller_membership_id() else {
            debug!("no membership in context, enforcing without role");
            return Ok(AccessPosture::deny_by_default());
        };

        let role_id = self
            .role_lookup
            .role_for(membership_id, tenant_id)
            .await
            .map_err(|e| log_and_convert("role_for", e))?;
        if role_id.is_none() {
            debug!(%membership_id, "membership has no role in tenant");
        }

        Ok(AccessPosture::for_context(context, role_id))
    }

    async fn connection_for(
        &self,
        tenant_id: TenantId,
    ) -> Result<TenantConnectionRef, ResolveError> {
        let connection = self
            .connections
            .connection_for(tenant_id)
            .await
            .map_err(|e| log_and_convert("connection_for", e))?;

        let actual = connection.tenant_id();
        if actual != tenant_id {
            return Err(log_and_convert(
                "connection_for",
                ConnectionError::TenantMismatch {
                    expected: tenant_id,
                    actual,
                },
            ));
        }

        debug!("tenant connection acquired");
        Ok(connection)
    }
}

fn require_tenant(context: &ExecutionContext) -> Result<TenantId, ResolveError> {
    let Some(tenant_id) = context.tenant_id() else {
        warn!("resolution requested outside of a tenant scope");
        return Err(ResolveError::TenantNotResolved);
    };
    Span::current().record("tenant_id", field::display(tenant_id));
    Ok(tenant_id)
}

fn log_and_convert<E>(op: &str, e: E) -> ResolveError
where
    E: std::error::Error + Into<ResolveError>,
{
    tracing::error!(operation = op, error = %e, "repository resolution collaborator failed");
    e.into()
}
