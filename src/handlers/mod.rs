pub mod admin;
pub mod clients;
pub mod projects;
pub mod tasks;
pub mod time_entries;
pub mod workspaces;

use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::response::ApiResponse;
use crate::middleware::tenant_context::RequestMeta;
use crate::state::AppState;
use crate::tenancy::{AccessDecision, Principal, RequestScope, TenantContext};

/// How a route family surfaces a denial. User-facing routes answer 404 so a
/// principal who may not see a resource cannot learn that it exists;
/// administrative routes answer 403 with detail to keep operators unblocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    UserFacing,
    Administrative,
}

pub(crate) fn deny(reason: &str, class: RouteClass) -> ApiError {
    match class {
        RouteClass::UserFacing => ApiError::not_found("not found"),
        RouteClass::Administrative => ApiError::forbidden(reason.to_string()),
    }
}

/// The single decision-to-HTTP translation. Routes never map decisions ad
/// hoc; they all come through here so enforcement reads the same across the
/// whole API surface.
pub(crate) fn respond<T: Serialize>(
    decision: AccessDecision<T>,
    class: RouteClass,
) -> Result<ApiResponse<T>, ApiError> {
    match decision {
        AccessDecision::Allowed(data) => Ok(ApiResponse::success(data)),
        AccessDecision::AllowedWithWarning { resource, reason } => {
            Ok(ApiResponse::success(resource).with_warning(reason))
        }
        AccessDecision::Denied(reason) => Err(deny(reason, class)),
        AccessDecision::NotFound => Err(ApiError::not_found("not found")),
    }
}

/// Unwrap an allowed decision for decision-then-write flows, carrying any
/// legacy warning forward to the final response.
pub(crate) fn require<T>(
    decision: AccessDecision<T>,
    class: RouteClass,
) -> Result<(T, Option<&'static str>), ApiError> {
    match decision {
        AccessDecision::Allowed(resource) => Ok((resource, None)),
        AccessDecision::AllowedWithWarning { resource, reason } => Ok((resource, Some(reason))),
        AccessDecision::Denied(reason) => Err(deny(reason, class)),
        AccessDecision::NotFound => Err(ApiError::not_found("not found")),
    }
}

pub(crate) fn scope_of<'a>(
    state: &AppState,
    principal: &'a Principal,
    context: TenantContext,
    meta: &'a RequestMeta,
) -> RequestScope<'a> {
    RequestScope {
        principal,
        context,
        mode: state.mode,
        request_id: meta.request_id,
        route: &meta.route,
    }
}
