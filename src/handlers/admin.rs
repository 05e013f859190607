use axum::extract::{Extension, Path, State};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::store::models::TenantRecord;
use crate::store::tenants;
use crate::tenancy::Principal;

/// Administrative routes are tenant-agnostic by design and restricted to
/// privileged principals. Unlike the user-facing surface they answer 403
/// with detail; an operator debugging access is the audience here.
fn require_privileged(principal: &Principal) -> Result<(), ApiError> {
    if principal.privileged {
        Ok(())
    } else {
        Err(ApiError::forbidden(
            "platform operator privileges required",
        ))
    }
}

/// GET /api/admin/tenants
pub async fn list_tenants(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Vec<TenantRecord>> {
    require_privileged(&principal)?;
    let records = tenants::list_active(&state.pool).await?;
    Ok(ApiResponse::success(records))
}

/// GET /api/admin/tenants/:id
pub async fn show_tenant(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<Uuid>,
) -> ApiResult<TenantRecord> {
    require_privileged(&principal)?;
    let record = tenants::find(&state.pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("tenant '{}' not found", id)))?;
    Ok(ApiResponse::success(record))
}
