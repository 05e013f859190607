use axum::{
    extract::{Extension, Path, State},
    Json,
};
use uuid::Uuid;

use crate::middleware::response::{ApiResponse, ApiResult};
use crate::middleware::tenant_context::RequestMeta;
use crate::state::AppState;
use crate::store::clients::{self, NewClient};
use crate::store::models::Client;
use crate::tenancy::{fetch_resource, list_resources, Principal, TenantContext};

use super::{require, respond, scope_of, RouteClass};

/// GET /api/clients
pub async fn list(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(context): Extension<TenantContext>,
    Extension(meta): Extension<RequestMeta>,
) -> ApiResult<Vec<Client>> {
    let scope = scope_of(&state, &principal, context, &meta);
    let store = clients::clients(&state.pool);
    let decision = list_resources(&scope, &store).await?;
    respond(decision, RouteClass::UserFacing)
}

/// GET /api/clients/:id
pub async fn show(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(context): Extension<TenantContext>,
    Extension(meta): Extension<RequestMeta>,
    Path(id): Path<Uuid>,
) -> ApiResult<Client> {
    let scope = scope_of(&state, &principal, context, &meta);
    let store = clients::clients(&state.pool);
    let decision = fetch_resource(&scope, &store, id).await?;
    respond(decision, RouteClass::UserFacing)
}

/// POST /api/clients
pub async fn create(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Extension(context): Extension<TenantContext>,
    Extension(meta): Extension<RequestMeta>,
    Json(payload): Json<NewClient>,
) -> ApiResult<Client> {
    let scope = scope_of(&state, &principal, context, &meta);
    let (tenant_id, warning) = require(scope.write_tenant(), RouteClass::UserFacing)?;
    let client = clients::insert(&state.pool, tenant_id, payload).await?;
    Ok(ApiResponse::created(client).maybe_warning(warning))
}
