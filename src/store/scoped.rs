use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool};
use uuid::Uuid;

use crate::tenancy::{ResourceLookup, TenantScoped};

/// Generic tenant-aware reader over one table. Implements the engine's
/// [`ResourceLookup`] seam, so wiring a new entity type into the access
/// procedure is one constructor call, not another copy of the
/// off/soft/strict branching.
///
/// Table and entity names come from the adapter constructors below each
/// entity module, never from request input.
pub struct ScopedStore<T> {
    table: &'static str,
    entity: &'static str,
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> ScopedStore<T>
where
    T: for<'r> FromRow<'r, PgRow> + TenantScoped + Send + Sync + Unpin,
{
    pub fn new(table: &'static str, entity: &'static str, pool: PgPool) -> Self {
        Self {
            table,
            entity,
            pool,
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<T> ResourceLookup for ScopedStore<T>
where
    T: for<'r> FromRow<'r, PgRow> + TenantScoped + Send + Sync + Unpin,
{
    type Resource = T;

    fn entity(&self) -> &'static str {
        self.entity
    }

    async fn fetch_scoped(&self, tenant_id: Uuid, id: Uuid) -> anyhow::Result<Option<T>> {
        let sql = format!(
            "SELECT * FROM {} WHERE id = $1 AND tenant_id = $2 AND deleted_at IS NULL",
            self.table
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn fetch_unscoped(&self, id: Uuid) -> anyhow::Result<Option<T>> {
        let sql = format!(
            "SELECT * FROM {} WHERE id = $1 AND deleted_at IS NULL",
            self.table
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_scoped(&self, tenant_id: Uuid, include_legacy: bool) -> anyhow::Result<Vec<T>> {
        let sql = if include_legacy {
            format!(
                "SELECT * FROM {} WHERE (tenant_id = $1 OR tenant_id IS NULL) \
                 AND deleted_at IS NULL ORDER BY created_at DESC",
                self.table
            )
        } else {
            format!(
                "SELECT * FROM {} WHERE tenant_id = $1 \
                 AND deleted_at IS NULL ORDER BY created_at DESC",
                self.table
            )
        };
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(tenant_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_unscoped(&self) -> anyhow::Result<Vec<T>> {
        let sql = format!(
            "SELECT * FROM {} WHERE deleted_at IS NULL ORDER BY created_at DESC",
            self.table
        );
        let rows = sqlx::query_as::<_, T>(&sql).fetch_all(&self.pool).await?;
        Ok(rows)
    }
}
