use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::Workspace;
use crate::tenancy::WorkspaceSource;

/// Workspace lookups backing the resolution cache.
pub struct PgWorkspaceSource {
    pool: PgPool,
}

impl PgWorkspaceSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkspaceSource for PgWorkspaceSource {
    async fn primary_workspace(&self, tenant_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM workspaces WHERE tenant_id = $1 AND is_primary = true LIMIT 1",
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn any_workspace(&self, tenant_id: Uuid) -> anyhow::Result<Option<Uuid>> {
        let id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM workspaces WHERE tenant_id = $1 ORDER BY created_at ASC LIMIT 1",
        )
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }
}

pub async fn find(pool: &PgPool, workspace_id: Uuid) -> Result<Option<Workspace>, sqlx::Error> {
    sqlx::query_as::<_, Workspace>("SELECT * FROM workspaces WHERE id = $1")
        .bind(workspace_id)
        .fetch_optional(pool)
        .await
}
