#![allow(clippy::unwrap_used, clippy::expect_used, dead_code)]

//! Collaborator fakes shared by the resolver tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use modkit_db::{ConnectionError, TenantConnection, TenantConnectionProvider, TenantConnectionRef};
use modkit_orm::{
    ClassNameNormalizer, RepositoryResolver, RoleLookup, RoleLookupError, WorkspaceEntity,
};
use modkit_security::{MembershipId, RoleId, TenantId};
use tokio::sync::Notify;
use uuid::Uuid;

pub struct ContactWorkspaceEntity;
impl WorkspaceEntity for ContactWorkspaceEntity {}

pub struct PersonWorkspaceEntity;
impl WorkspaceEntity for PersonWorkspaceEntity {}

pub fn tenant(n: u128) -> TenantId {
    Uuid::from_u128(0x7e_0000 + n)
}

pub fn membership(n: u128) -> MembershipId {
    Uuid::from_u128(0x3e_0000 + n)
}

pub fn role(n: u128) -> RoleId {
    Uuid::from_u128(0x20_0000 + n)
}

/// Ordered record of collaborator calls, shared between fakes.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    pub fn push(&self, call: &'static str) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct FakeRoleLookup {
    roles: HashMap<(MembershipId, TenantId), RoleId>,
    failure: Option<RoleLookupError>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    last_args: Mutex<Option<(MembershipId, TenantId)>>,
    log: CallLog,
}

impl FakeRoleLookup {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_role(mut self, membership_id: MembershipId, tenant_id: TenantId, role_id: RoleId) -> Self {
        self.roles.insert((membership_id, tenant_id), role_id);
        self
    }

    #[must_use]
    pub fn failing(mut self, err: RoleLookupError) -> Self {
        self.failure = Some(err);
        self
    }

    /// Block every lookup until the gate is notified.
    #[must_use]
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_args(&self) -> Option<(MembershipId, TenantId)> {
        *self.last_args.lock().unwrap()
    }
}

#[async_trait]
impl RoleLookup for FakeRoleLookup {
    async fn role_for(
        &self,
        membership_id: MembershipId,
        tenant_id: TenantId,
    ) -> Result<Option<RoleId>, RoleLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_args.lock().unwrap() = Some((membership_id, tenant_id));
        self.log.push("role_for");

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        tokio::task::yield_now().await;

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(self.roles.get(&(membership_id, tenant_id)).copied())
    }
}

#[derive(Debug)]
pub struct FakeConnection {
    tenant_id: TenantId,
    /// Sequence number assigned when the provider created this connection.
    pub serial: usize,
}

impl TenantConnection for FakeConnection {
    fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }
}

/// Provider that creates one connection per tenant on first use and caches it.
#[derive(Default)]
pub struct FakeConnectionProvider {
    cache: Mutex<HashMap<TenantId, Arc<FakeConnection>>>,
    failure: Option<ConnectionError>,
    redirect_to: Option<TenantId>,
    calls: AtomicUsize,
    created: AtomicUsize,
    log: CallLog,
}

impl FakeConnectionProvider {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing(mut self, err: ConnectionError) -> Self {
        self.failure = Some(err);
        self
    }

    /// Hand out connections of `tenant_id` regardless of the tenant requested.
    #[must_use]
    pub fn redirecting_to(mut self, tenant_id: TenantId) -> Self {
        self.redirect_to = Some(tenant_id);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn cached(&self, tenant_id: TenantId) -> Option<Arc<FakeConnection>> {
        self.cache.lock().unwrap().get(&tenant_id).cloned()
    }
}

#[async_trait]
impl TenantConnectionProvider for FakeConnectionProvider {
    async fn connection_for(
        &self,
        tenant_id: TenantId,
    ) -> Result<TenantConnectionRef, ConnectionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.push("connection_for");
        tokio::task::yield_now().await;

        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        let tenant_id = self.redirect_to.unwrap_or(tenant_id);
        let conn = {
            let mut cache = self.cache.lock().unwrap();
            Arc::clone(cache.entry(tenant_id).or_insert_with(|| {
                Arc::new(FakeConnection {
                    tenant_id,
                    serial: self.created.fetch_add(1, Ordering::SeqCst),
                })
            }))
        };
        Ok(conn)
    }
}

pub struct Fixture {
    pub resolver: RepositoryResolver,
    pub roles: Arc<FakeRoleLookup>,
    pub connections: Arc<FakeConnectionProvider>,
    pub log: CallLog,
}

pub fn fixture(
    roles: impl FnOnce(FakeRoleLookup) -> FakeRoleLookup,
    connections: impl FnOnce(FakeConnectionProvider) -> FakeConnectionProvider,
) -> Fixture {
    let log = CallLog::default();
    let roles = Arc::new(roles(FakeRoleLookup::new(log.clone())));
    let connections = Arc::new(connections(FakeConnectionProvider::new(log.clone())));

    let resolver = RepositoryResolver::new(
        Arc::new(ClassNameNormalizer::default()),
        roles.clone(),
        connections.clone(),
    );

    Fixture {
        resolver,
        roles,
        connections,
        log,
    }
}
