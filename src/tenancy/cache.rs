use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Upstream store the cache refreshes from.
#[async_trait]
pub trait WorkspaceSource: Send + Sync + 'static {
    /// The workspace flagged as the tenant's primary.
    async fn primary_workspace(&self, tenant_id: Uuid) -> anyhow::Result<Option<Uuid>>;

    /// Any workspace belonging to the tenant, used when no primary flag is
    /// set. A tenant should have exactly one primary; anything else is a
    /// data-integrity smell worth logging, not worth failing a request.
    async fn any_workspace(&self, tenant_id: Uuid) -> anyhow::Result<Option<Uuid>>;
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Distinct from a cache miss: the tenant has no workspace row at all.
    #[error("tenant '{0}' has no workspace")]
    NoWorkspace(Uuid),
    #[error("workspace lookup failed: {0}")]
    Source(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Copy)]
struct CacheEntry {
    workspace_id: Uuid,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// TTL-bounded tenant -> primary-workspace mapping.
///
/// Injected through application state rather than held as a process global
/// so tests can swap the source and deployments can disable it. Locks are
/// std (not tokio) and never held across an await; the cache only ever
/// stores *a* valid workspace per tenant, so racing refreshes cost at most
/// a few redundant upstream reads, never correctness.
#[derive(Clone)]
pub struct WorkspaceCache {
    source: Arc<dyn WorkspaceSource>,
    ttl: Duration,
    entries: Arc<RwLock<HashMap<Uuid, CacheEntry>>>,
    // Single-flight set: at most one outstanding background refresh per key.
    refreshing: Arc<Mutex<HashSet<Uuid>>>,
}

impl WorkspaceCache {
    pub fn new(source: Arc<dyn WorkspaceSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
            refreshing: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Blocking accessor: never returns an entry past its TTL without
    /// refreshing it first.
    pub async fn get(&self, tenant_id: Uuid) -> Result<Uuid, CacheError> {
        if let Some(workspace_id) = self.fresh(tenant_id) {
            return Ok(workspace_id);
        }
        self.refresh(tenant_id).await
    }

    /// Non-blocking accessor for call sites that cannot await I/O: returns
    /// the cached value (stale included) immediately and warms the cache in
    /// the background on a miss or an expired entry. May lag the store by
    /// at most one outstanding refresh.
    pub fn get_nonblocking(&self, tenant_id: Uuid) -> Option<Uuid> {
        let now = Instant::now();
        let entry = {
            let entries = self.entries.read().expect("workspace cache lock poisoned");
            entries.get(&tenant_id).copied()
        };

        match entry {
            Some(entry) if entry.is_fresh(now) => Some(entry.workspace_id),
            Some(stale) => {
                self.spawn_refresh(tenant_id);
                Some(stale.workspace_id)
            }
            None => {
                self.spawn_refresh(tenant_id);
                None
            }
        }
    }

    pub fn put(&self, tenant_id: Uuid, workspace_id: Uuid) {
        let entry = CacheEntry {
            workspace_id,
            expires_at: Instant::now() + self.ttl,
        };
        let mut entries = self.entries.write().expect("workspace cache lock poisoned");
        entries.insert(tenant_id, entry);
    }

    pub fn invalidate(&self, tenant_id: Uuid) {
        let mut entries = self.entries.write().expect("workspace cache lock poisoned");
        entries.remove(&tenant_id);
    }

    fn fresh(&self, tenant_id: Uuid) -> Option<Uuid> {
        let now = Instant::now();
        let entries = self.entries.read().expect("workspace cache lock poisoned");
        entries
            .get(&tenant_id)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.workspace_id)
    }

    async fn refresh(&self, tenant_id: Uuid) -> Result<Uuid, CacheError> {
        if let Some(workspace_id) = self.source.primary_workspace(tenant_id).await? {
            self.put(tenant_id, workspace_id);
            return Ok(workspace_id);
        }

        match self.source.any_workspace(tenant_id).await? {
            Some(workspace_id) => {
                tracing::warn!(
                    tenant_id = %tenant_id,
                    workspace_id = %workspace_id,
                    "tenant has no primary workspace flagged; falling back to an arbitrary one"
                );
                self.put(tenant_id, workspace_id);
                Ok(workspace_id)
            }
            None => {
                tracing::error!(
                    tenant_id = %tenant_id,
                    "tenant has no workspace at all; requests for this tenant will degrade"
                );
                Err(CacheError::NoWorkspace(tenant_id))
            }
        }
    }

    /// Fire-and-forget warm-up. Detached from the triggering request so a
    /// client disconnect never cancels it; failures are logged, never
    /// propagated.
    fn spawn_refresh(&self, tenant_id: Uuid) {
        {
            let mut refreshing = self.refreshing.lock().expect("refresh set lock poisoned");
            if !refreshing.insert(tenant_id) {
                return;
            }
        }

        let cache = self.clone();
        tokio::spawn(async move {
            let result = cache.refresh(tenant_id).await;
            {
                let mut refreshing = cache.refreshing.lock().expect("refresh set lock poisoned");
                refreshing.remove(&tenant_id);
            }
            if let Err(e) = result {
                tracing::warn!(tenant_id = %tenant_id, "background workspace refresh failed: {}", e);
            }
        });
    }
}
