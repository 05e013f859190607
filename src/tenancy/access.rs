use async_trait::async_trait;
use uuid::Uuid;

use super::context::TenantContext;
use super::mode::EnforcementMode;
use super::ownership::{self, AccessDecision, TenantScoped, LEGACY_ROW_REASON, NO_CONTEXT_REASON};
use super::principal::Principal;

/// Everything the decision procedure needs about the request: resolved
/// context, actor, the process enforcement mode, and correlation fields for
/// the warning log.
#[derive(Debug, Clone)]
pub struct RequestScope<'a> {
    pub principal: &'a Principal,
    pub context: TenantContext,
    pub mode: EnforcementMode,
    pub request_id: Uuid,
    pub route: &'a str,
}

impl<'a> RequestScope<'a> {
    /// Tenant to stamp on newly created rows. Once a tenant context exists,
    /// writes never produce new legacy rows; only `off` mode still allows
    /// unstamped (pre-isolation) writes.
    pub fn write_tenant(&self) -> AccessDecision<Option<Uuid>> {
        match self.context.effective_tenant_id {
            Some(tenant_id) => AccessDecision::Allowed(Some(tenant_id)),
            None if matches!(self.mode, EnforcementMode::Off) => AccessDecision::Allowed(None),
            None => AccessDecision::Denied(NO_CONTEXT_REASON),
        }
    }
}

/// Storage seam the procedure is parameterized by. Adding an entity type
/// means providing one implementation of this trait, not re-spelling the
/// off/soft/strict branching at every call site.
#[async_trait]
pub trait ResourceLookup: Send + Sync {
    type Resource: TenantScoped + Send;

    /// Entity type name for warning logs ("task", "project", ...).
    fn entity(&self) -> &'static str;

    async fn fetch_scoped(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> anyhow::Result<Option<Self::Resource>>;

    async fn fetch_unscoped(&self, id: Uuid) -> anyhow::Result<Option<Self::Resource>>;

    /// Rows for the tenant, optionally including null-tenant legacy rows.
    /// Never includes rows owned by a different tenant.
    async fn list_scoped(
        &self,
        tenant_id: Uuid,
        include_legacy: bool,
    ) -> anyhow::Result<Vec<Self::Resource>>;

    async fn list_unscoped(&self) -> anyhow::Result<Vec<Self::Resource>>;
}

#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("resource lookup failed: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Fetch a single resource under the request's tenant scope.
///
/// Scoped lookup first; in soft mode a miss falls back to an unscoped
/// lookup that may surface a null-tenant legacy row (with a warning) but
/// never a foreign tenant's row. In off mode, and for privileged principals
/// with no context, the lookup is unscoped from the start.
pub async fn fetch_resource<L: ResourceLookup>(
    scope: &RequestScope<'_>,
    lookup: &L,
    id: Uuid,
) -> Result<AccessDecision<L::Resource>, AccessError> {
    let decision = match scope.context.effective_tenant_id {
        Some(tenant_id) if !matches!(scope.mode, EnforcementMode::Off) => {
            match lookup.fetch_scoped(tenant_id, id).await? {
                Some(resource) => ownership::validate(Some(tenant_id), resource, scope.mode),
                None if scope.mode.is_soft() => match lookup.fetch_unscoped(id).await? {
                    Some(resource) => {
                        match ownership::validate(Some(tenant_id), resource, scope.mode) {
                            // The row belongs to another tenant. The scoped
                            // path could never have shown it, so its
                            // existence must not leak through the fallback.
                            AccessDecision::Denied(_) => AccessDecision::NotFound,
                            other => other,
                        }
                    }
                    None => AccessDecision::NotFound,
                },
                None => AccessDecision::NotFound,
            }
        }
        Some(tenant_id) => {
            // Mode off: pre-isolation reads, single unscoped lookup.
            match lookup.fetch_unscoped(id).await? {
                Some(resource) => ownership::validate(Some(tenant_id), resource, scope.mode),
                None => AccessDecision::NotFound,
            }
        }
        None if scope.principal.privileged => {
            // Explicitly tenant-agnostic operation by a platform operator.
            match lookup.fetch_unscoped(id).await? {
                Some(resource) => AccessDecision::Allowed(resource),
                None => AccessDecision::NotFound,
            }
        }
        None => AccessDecision::Denied(NO_CONTEXT_REASON),
    };

    if let AccessDecision::AllowedWithWarning { resource, reason } = &decision {
        warn_legacy_read(scope, lookup.entity(), Some(resource.resource_id()), reason, 1);
    }

    Ok(decision)
}

/// List resources under the request's tenant scope.
///
/// Soft mode applies the same null-or-own-tenant filter as single-resource
/// fetches; listings never union other tenants' rows.
pub async fn list_resources<L: ResourceLookup>(
    scope: &RequestScope<'_>,
    lookup: &L,
) -> Result<AccessDecision<Vec<L::Resource>>, AccessError> {
    let decision = match scope.context.effective_tenant_id {
        Some(tenant_id) => match scope.mode {
            EnforcementMode::Strict => {
                AccessDecision::Allowed(lookup.list_scoped(tenant_id, false).await?)
            }
            EnforcementMode::Soft => {
                let rows = lookup.list_scoped(tenant_id, true).await?;
                let legacy_rows = rows.iter().filter(|r| r.tenant_id().is_none()).count();
                if legacy_rows > 0 {
                    warn_legacy_read(scope, lookup.entity(), None, LEGACY_ROW_REASON, legacy_rows);
                    AccessDecision::AllowedWithWarning {
                        resource: rows,
                        reason: LEGACY_ROW_REASON,
                    }
                } else {
                    AccessDecision::Allowed(rows)
                }
            }
            EnforcementMode::Off => AccessDecision::Allowed(lookup.list_unscoped().await?),
        },
        None if scope.principal.privileged => {
            AccessDecision::Allowed(lookup.list_unscoped().await?)
        }
        None => AccessDecision::Denied(NO_CONTEXT_REASON),
    };

    Ok(decision)
}

/// Structured trail for residual legacy-data exposure. Operators watch this
/// (plus the response header) to find rows to backfill before the mode goes
/// strict.
fn warn_legacy_read(
    scope: &RequestScope<'_>,
    entity: &'static str,
    entity_id: Option<Uuid>,
    reason: &str,
    rows: usize,
) {
    match entity_id {
        Some(id) => tracing::warn!(
            route = scope.route,
            reason,
            user_id = %scope.principal.user_id,
            request_id = %scope.request_id,
            entity,
            entity_id = %id,
            "serving legacy data without tenant scope"
        ),
        None => tracing::warn!(
            route = scope.route,
            reason,
            user_id = %scope.principal.user_id,
            request_id = %scope.request_id,
            entity,
            legacy_rows = rows,
            "listing includes legacy rows without tenant scope"
        ),
    }
}
