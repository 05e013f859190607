use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;
use crate::tenancy::{self, Principal};

use super::request_id::RequestId;

/// Header a privileged principal uses to pick an effective tenant.
/// Non-privileged senders are ignored, not rejected (sending the header is
/// not itself a violation; acting on it would be).
pub const TENANT_OVERRIDE_HEADER: &str = "x-tenant-id";

/// Route prefixes that bypass tenant enforcement entirely. An explicit
/// allow-list: health, token acquisition, signature-verified webhooks, and
/// onboarding flows that run before the account has a tenant.
pub const EXEMPT_PATH_PREFIXES: &[&str] = &["/health", "/auth/", "/webhooks/", "/onboarding/"];

pub fn is_exempt_path(path: &str) -> bool {
    path == "/" || EXEMPT_PATH_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Correlation fields consumed by the access-decision warning log.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub request_id: Uuid,
    pub route: String,
}

/// Resolves the effective tenant once per request and injects it as the
/// [`tenancy::TenantContext`] extension. Everything downstream reuses that
/// single resolution for the request's lifetime.
pub async fn tenant_context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_exempt_path(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let principal = request
        .extensions()
        .get::<Principal>()
        .cloned()
        .ok_or_else(|| ApiError::unauthorized("authentication required before tenant resolution"))?;

    let requested_tenant = parse_override_header(&request)?;

    let context = tenancy::resolve(
        &principal,
        requested_tenant,
        state.tenant_directory.as_ref(),
    )
    .await?;

    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|r| r.0)
        .unwrap_or_else(Uuid::new_v4);
    let meta = RequestMeta {
        request_id,
        route: request.uri().path().to_string(),
    };

    request.extensions_mut().insert(context);
    request.extensions_mut().insert(meta);

    Ok(next.run(request).await)
}

fn parse_override_header(request: &Request) -> Result<Option<Uuid>, ApiError> {
    let Some(raw) = request.headers().get(TENANT_OVERRIDE_HEADER) else {
        return Ok(None);
    };

    let value = raw
        .to_str()
        .map_err(|_| ApiError::bad_request("invalid X-Tenant-Id header"))?;

    Uuid::parse_str(value)
        .map(Some)
        .map_err(|_| ApiError::bad_request("X-Tenant-Id must be a tenant UUID"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exempt_paths_are_an_explicit_allow_list() {
        assert!(is_exempt_path("/"));
        assert!(is_exempt_path("/health"));
        assert!(is_exempt_path("/auth/login"));
        assert!(is_exempt_path("/webhooks/time-clock"));
        assert!(is_exempt_path("/onboarding/invite"));

        assert!(!is_exempt_path("/api/tasks"));
        assert!(!is_exempt_path("/api/admin/tenants"));
        // Never inferred from a shared prefix.
        assert!(!is_exempt_path("/authx"));
        assert!(!is_exempt_path("/api/auth/session"));
    }
}
