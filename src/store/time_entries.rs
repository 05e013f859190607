use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::TimeEntry;
use super::scoped::ScopedStore;

/// Engine adapter for the time_entries table.
pub fn time_entries(pool: &PgPool) -> ScopedStore<TimeEntry> {
    ScopedStore::new("time_entries", "time_entry", pool.clone())
}

#[derive(Debug, Deserialize)]
pub struct NewTimeEntry {
    pub task_id: Option<Uuid>,
    pub minutes: i32,
    pub entry_date: NaiveDate,
    pub note: Option<String>,
}

pub async fn insert(
    pool: &PgPool,
    tenant_id: Option<Uuid>,
    user_id: Uuid,
    new: NewTimeEntry,
) -> Result<TimeEntry, sqlx::Error> {
    sqlx::query_as::<_, TimeEntry>(
        r#"
        INSERT INTO time_entries (id, tenant_id, task_id, user_id, minutes, entry_date, note)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(new.task_id)
    .bind(user_id)
    .bind(new.minutes)
    .bind(new.entry_date)
    .bind(new.note)
    .fetch_one(pool)
    .await
}
