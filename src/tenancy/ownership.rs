use uuid::Uuid;

use super::mode::EnforcementMode;

/// Implemented by every row type that carries the nullable `tenant_id`
/// column. A null is a legacy row from before tenant isolation existed.
pub trait TenantScoped {
    fn tenant_id(&self) -> Option<Uuid>;
    fn resource_id(&self) -> Uuid;
}

/// Outcome of an ownership check. Produced and consumed within one request;
/// the route layer translates it to HTTP exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision<T> {
    Allowed(T),
    AllowedWithWarning { resource: T, reason: &'static str },
    Denied(&'static str),
    NotFound,
}

impl<T> AccessDecision<T> {
    pub fn is_allowed(&self) -> bool {
        matches!(
            self,
            AccessDecision::Allowed(_) | AccessDecision::AllowedWithWarning { .. }
        )
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AccessDecision<U> {
        match self {
            AccessDecision::Allowed(resource) => AccessDecision::Allowed(f(resource)),
            AccessDecision::AllowedWithWarning { resource, reason } => {
                AccessDecision::AllowedWithWarning {
                    resource: f(resource),
                    reason,
                }
            }
            AccessDecision::Denied(reason) => AccessDecision::Denied(reason),
            AccessDecision::NotFound => AccessDecision::NotFound,
        }
    }
}

pub const LEGACY_ROW_REASON: &str = "legacy row without tenant id";
pub const NO_CONTEXT_REASON: &str = "request has no tenant context";
pub const CROSS_TENANT_REASON: &str = "resource belongs to another tenant";

/// The ownership truth table. Pure: a deterministic function of the
/// effective tenant, the row's tenant column, and the enforcement mode.
pub fn validate<T: TenantScoped>(
    effective_tenant_id: Option<Uuid>,
    resource: T,
    mode: EnforcementMode,
) -> AccessDecision<T> {
    let Some(effective) = effective_tenant_id else {
        // Unscoped requests are handled by the caller (privileged,
        // tenant-agnostic operations only); reaching the validator without
        // a context is always a denial.
        return AccessDecision::Denied(NO_CONTEXT_REASON);
    };

    match resource.tenant_id() {
        Some(owner) if owner == effective => AccessDecision::Allowed(resource),
        Some(_) => match mode {
            // Off disables enforcement entirely, matching pre-isolation reads.
            EnforcementMode::Off => AccessDecision::Allowed(resource),
            // A foreign-tenant row is never tolerated; soft mode only
            // relaxes visibility of *null* legacy rows.
            EnforcementMode::Soft | EnforcementMode::Strict => {
                AccessDecision::Denied(CROSS_TENANT_REASON)
            }
        },
        None => match mode {
            EnforcementMode::Off => AccessDecision::Allowed(resource),
            EnforcementMode::Soft => AccessDecision::AllowedWithWarning {
                resource,
                reason: LEGACY_ROW_REASON,
            },
            EnforcementMode::Strict => AccessDecision::NotFound,
        },
    }
}
