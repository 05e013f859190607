use axum::{
    extract::{Extension, Path, State},
    Json,
};
use uuid::Uuid;

use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::tenant_context::RequestMeta;
use crate::state::AppState;
use crate::store::models::TimeEntry;
use crate::store::time_entries::{self, NewTimeEntry};
use crate::tenancy::{fetch_resource, list_resources, Principal, TenantContext};

use super::{require, respond, scope_of, RouteClass};

/// GET /api/time-entries
pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(context): Extension<TenantContext>,
    Extension(meta): Extension<RequestMeta>,
) -> ApiResult<Vec<TimeEntry>> {
    let scope = scope_of(&state, &principal, context, &meta);
    let store = time_entries::time_entries(&state.pool);
    let decision = list_resources(&scope, &store).await?;
    respond(decision, RouteClass::UserFacing)
}

/// GET /api/time-entries/:id
pub async fn show(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(context): Extension<TenantContext>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
) -> ApiResult<TimeEntry> {
    let scope = scope_of(&state, &principal, context, &meta);
    let store = time_entries::time_entries(&state.pool);
    let decision = fetch_resource(&scope, &store, id).await?;
    respond(decision, RouteClass::UserFacing)
}

/// POST /api/time-entries
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(context): Extension<TenantContext>,
    Extension(meta): Extension<RequestMeta>,
    Json(payload): Json<NewTimeEntry>,
) -> ApiResult<TimeEntry> {
    let scope = scope_of(&state, &principal, context, &meta);
    let (tenant_id, warning) = require(scope.write_tenant(), RouteClass::UserFacing)?;
    let entry = time_entries::insert(&state.pool, tenant_id, principal.user_id, payload).await?;
    Ok(ApiResponse::created(entry).maybe_warning(warning))
}
