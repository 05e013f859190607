use axum::{
    extract::{Extension, Path, State},
    Json,
};
use uuid::Uuid;

use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::tenant_context::RequestMeta;
use crate::state::AppState;
use crate::store::models::Project;
use crate::store::projects::{self, NewProject, ProjectPatch};
use crate::tenancy::{fetch_resource, list_resources, Principal, TenantContext};

use super::{require, respond, scope_of, RouteClass};

/// GET /api/projects
pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(context): Extension<TenantContext>,
    Extension(meta): Extension<RequestMeta>,
) -> ApiResult<Vec<Project>> {
    let scope = scope_of(&state, &principal, context, &meta);
    let store = projects::projects(&state.pool);
    let decision = list_resources(&scope, &store).await?;
    respond(decision, RouteClass::UserFacing)
}

/// GET /api/projects/:id
pub async fn show(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(context): Extension<TenantContext>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
) -> ApiResult<Project> {
    let scope = scope_of(&state, &principal, context, &meta);
    let store = projects::projects(&state.pool);
    let decision = fetch_resource(&scope, &store, id).await?;
    respond(decision, RouteClass::UserFacing)
}

/// POST /api/projects
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(context): Extension<TenantContext>,
    Extension(meta): Extension<RequestMeta>,
    Json(payload): Json<NewProject>,
) -> ApiResult<Project> {
    let scope = scope_of(&state, &principal, context, &meta);
    let (tenant_id, warning) = require(scope.write_tenant(), RouteClass::UserFacing)?;
    let project = projects::insert(&state.pool, tenant_id, payload).await?;
    Ok(ApiResponse::created(project).maybe_warning(warning))
}

/// PATCH /api/projects/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(context): Extension<TenantContext>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProjectPatch>,
) -> ApiResult<Project> {
    let scope = scope_of(&state, &principal, context, &meta);
    let store = projects::projects(&state.pool);
    let decision = fetch_resource(&scope, &store, id).await?;
    let (_existing, warning) = require(decision, RouteClass::UserFacing)?;

    let updated = projects::update(&state.pool, id, patch).await?;
    Ok(ApiResponse::success(updated).maybe_warning(warning))
}

/// DELETE /api/projects/:id
pub async fn destroy(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(context): Extension<TenantContext>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
) -> ApiResult<()> {
    let scope = scope_of(&state, &principal, context, &meta);
    let store = projects::projects(&state.pool);
    let decision = fetch_resource(&scope, &store, id).await?;
    let (_existing, warning) = require(decision, RouteClass::UserFacing)?;

    projects::soft_delete(&state.pool, id).await?;
    Ok(ApiResponse::<()>::no_content().maybe_warning(warning))
}
