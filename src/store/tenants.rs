use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::TenantRecord;
use crate::tenancy::TenantDirectory;

/// Tenant registry backed by the tenants table. Overrides are validated
/// against active, non-deleted rows only; a deactivated tenant is as good
/// as absent.
pub struct PgTenantDirectory {
    pool: PgPool,
}

impl PgTenantDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantDirectory for PgTenantDirectory {
    async fn tenant_exists(&self, tenant_id: Uuid) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tenants WHERE id = $1 AND is_active = true AND deleted_at IS NULL)",
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}

pub async fn list_active(pool: &PgPool) -> Result<Vec<TenantRecord>, sqlx::Error> {
    sqlx::query_as::<_, TenantRecord>(
        "SELECT * FROM tenants WHERE deleted_at IS NULL ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn find(pool: &PgPool, tenant_id: Uuid) -> Result<Option<TenantRecord>, sqlx::Error> {
    sqlx::query_as::<_, TenantRecord>(
        "SELECT * FROM tenants WHERE id = $1 AND deleted_at IS NULL",
    )
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}
