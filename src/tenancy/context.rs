use async_trait::async_trait;
use uuid::Uuid;

use super::principal::Principal;

/// Per-request tenant scope. Resolved once by the middleware, then read by
/// every accessor for the request's lifetime. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantContext {
    pub effective_tenant_id: Option<Uuid>,
}

impl TenantContext {
    pub fn scoped(tenant_id: Uuid) -> Self {
        Self {
            effective_tenant_id: Some(tenant_id),
        }
    }

    pub fn unscoped() -> Self {
        Self {
            effective_tenant_id: None,
        }
    }
}

/// Registry of known tenants, used to validate explicit overrides before
/// trusting them.
#[async_trait]
pub trait TenantDirectory: Send + Sync {
    async fn tenant_exists(&self, tenant_id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("tenant '{0}' does not exist")]
    UnknownTenant(Uuid),
    #[error("tenant directory lookup failed: {0}")]
    Directory(#[from] anyhow::Error),
}

/// Compute the effective tenant for a request.
///
/// Non-privileged principals always act as their home tenant; an override
/// header is discarded, not acted on. Privileged principals act as the
/// override if it names a real tenant, and have *no* effective tenant
/// without one - tenant-scoped routes stay closed until they pick one.
pub async fn resolve(
    principal: &Principal,
    requested_tenant: Option<Uuid>,
    directory: &dyn TenantDirectory,
) -> Result<TenantContext, ResolveError> {
    if !principal.privileged {
        if let Some(requested) = requested_tenant {
            if Some(requested) != principal.home_tenant_id {
                tracing::debug!(
                    user_id = %principal.user_id,
                    requested = %requested,
                    "discarding tenant override from non-privileged principal"
                );
            }
        }
        return Ok(TenantContext {
            effective_tenant_id: principal.home_tenant_id,
        });
    }

    match requested_tenant {
        None => Ok(TenantContext::unscoped()),
        Some(tenant_id) => {
            if directory.tenant_exists(tenant_id).await? {
                Ok(TenantContext::scoped(tenant_id))
            } else {
                Err(ResolveError::UnknownTenant(tenant_id))
            }
        }
    }
}
