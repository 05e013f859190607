use sqlx::PgPool;
use std::sync::Arc;

use crate::tenancy::{EnforcementMode, TenantDirectory, WorkspaceCache};

/// Request-scoped dependency injection: everything route handlers and the
/// tenancy middleware need, built once in main(). The enforcement mode is
/// copied in at startup and never changes for the process lifetime.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub mode: EnforcementMode,
    pub workspace_cache: WorkspaceCache,
    pub tenant_directory: Arc<dyn TenantDirectory>,
}
