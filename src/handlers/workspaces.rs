use axum::extract::{Extension, State};

use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::store::models::Workspace;
use crate::store::workspaces;
use crate::tenancy::ownership::NO_CONTEXT_REASON;
use crate::tenancy::TenantContext;

use super::{deny, RouteClass};

/// GET /api/workspace - the effective tenant's primary workspace, resolved
/// through the TTL cache so steady-state requests cost no workspace query.
pub async fn current(
    State(state): State<AppState>,
    Extension(context): Extension<TenantContext>,
) -> ApiResult<Workspace> {
    let Some(tenant_id) = context.effective_tenant_id else {
        return Err(deny(NO_CONTEXT_REASON, RouteClass::UserFacing));
    };

    let workspace_id = state.workspace_cache.get(tenant_id).await?;

    let workspace = workspaces::find(&state.pool, workspace_id)
        .await?
        .ok_or_else(|| crate::error::ApiError::not_found("workspace not found"))?;

    Ok(ApiResponse::success(workspace))
}
