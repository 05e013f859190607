#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use worklane_api::tenancy::{
    EnforcementMode, Principal, RequestScope, ResourceLookup, TenantContext, TenantDirectory,
    TenantScoped, WorkspaceSource,
};

/// Minimal tenant-scoped row for exercising the engine without a database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub title: String,
}

impl Record {
    pub fn owned(tenant_id: Uuid, title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id: Some(tenant_id),
            title: title.to_string(),
        }
    }

    pub fn legacy(title: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id: None,
            title: title.to_string(),
        }
    }
}

impl TenantScoped for Record {
    fn tenant_id(&self) -> Option<Uuid> {
        self.tenant_id
    }
    fn resource_id(&self) -> Uuid {
        self.id
    }
}

pub struct MemoryStore {
    rows: Vec<Record>,
}

impl MemoryStore {
    pub fn new(rows: Vec<Record>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl ResourceLookup for MemoryStore {
    type Resource = Record;

    fn entity(&self) -> &'static str {
        "record"
    }

    async fn fetch_scoped(&self, tenant_id: Uuid, id: Uuid) -> anyhow::Result<Option<Record>> {
        Ok(self
            .rows
            .iter()
            .find(|r| r.id == id && r.tenant_id == Some(tenant_id))
            .cloned())
    }

    async fn fetch_unscoped(&self, id: Uuid) -> anyhow::Result<Option<Record>> {
        Ok(self.rows.iter().find(|r| r.id == id).cloned())
    }

    async fn list_scoped(
        &self,
        tenant_id: Uuid,
        include_legacy: bool,
    ) -> anyhow::Result<Vec<Record>> {
        Ok(self
            .rows
            .iter()
            .filter(|r| {
                r.tenant_id == Some(tenant_id) || (include_legacy && r.tenant_id.is_none())
            })
            .cloned()
            .collect())
    }

    async fn list_unscoped(&self) -> anyhow::Result<Vec<Record>> {
        Ok(self.rows.clone())
    }
}

pub struct MemoryDirectory {
    tenants: Vec<Uuid>,
}

impl MemoryDirectory {
    pub fn new(tenants: Vec<Uuid>) -> Self {
        Self { tenants }
    }
}

#[async_trait]
impl TenantDirectory for MemoryDirectory {
    async fn tenant_exists(&self, tenant_id: Uuid) -> anyhow::Result<bool> {
        Ok(self.tenants.contains(&tenant_id))
    }
}

/// Workspace source with swappable mappings and a lookup counter, for
/// asserting cache hit/miss behavior.
pub struct MemoryWorkspaceSource {
    primary: Mutex<HashMap<Uuid, Uuid>>,
    fallback: Mutex<HashMap<Uuid, Uuid>>,
    pub primary_calls: AtomicUsize,
}

impl MemoryWorkspaceSource {
    pub fn new() -> Self {
        Self {
            primary: Mutex::new(HashMap::new()),
            fallback: Mutex::new(HashMap::new()),
            primary_calls: AtomicUsize::new(0),
        }
    }

    pub fn set_primary(&self, tenant_id: Uuid, workspace_id: Uuid) {
        self.primary.lock().unwrap().insert(tenant_id, workspace_id);
    }

    pub fn clear_primary(&self, tenant_id: Uuid) {
        self.primary.lock().unwrap().remove(&tenant_id);
    }

    pub fn set_fallback(&self, tenant_id: Uuid, workspace_id: Uuid) {
        self.fallback.lock().unwrap().insert(tenant_id, workspace_id);
    }

    pub fn lookups(&self) -> usize {
        self.primary_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkspaceSource for MemoryWorkspaceSource {
    async fn primary_workspace(&self, tenant_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        self.primary_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.primary.lock().unwrap().get(&tenant_id).copied())
    }

    async fn any_workspace(&self, tenant_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        Ok(self.fallback.lock().unwrap().get(&tenant_id).copied())
    }
}

pub fn member_of(tenant_id: Uuid) -> Principal {
    Principal {
        user_id: Uuid::new_v4(),
        home_tenant_id: Some(tenant_id),
        privileged: false,
    }
}

pub fn detached_member() -> Principal {
    Principal {
        user_id: Uuid::new_v4(),
        home_tenant_id: None,
        privileged: false,
    }
}

pub fn operator() -> Principal {
    Principal {
        user_id: Uuid::new_v4(),
        home_tenant_id: None,
        privileged: true,
    }
}

pub fn scope_for<'a>(
    principal: &'a Principal,
    context: TenantContext,
    mode: EnforcementMode,
) -> RequestScope<'a> {
    RequestScope {
        principal,
        context,
        mode,
        request_id: Uuid::new_v4(),
        route: "/api/tasks",
    }
}
