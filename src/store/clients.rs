use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::Client;
use super::scoped::ScopedStore;

/// Engine adapter for the clients table.
pub fn clients(pool: &PgPool) -> ScopedStore<Client> {
    ScopedStore::new("clients", "client", pool.clone())
}

#[derive(Debug, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub contact_email: Option<String>,
}

pub async fn insert(
    pool: &PgPool,
    tenant_id: Option<Uuid>,
    new: NewClient,
) -> Result<Client, sqlx::Error> {
    sqlx::query_as::<_, Client>(
        r#"
        INSERT INTO clients (id, tenant_id, name, contact_email)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(new.name)
    .bind(new.contact_email)
    .fetch_one(pool)
    .await
}
