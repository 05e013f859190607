use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::Task;
use super::scoped::ScopedStore;

/// Engine adapter for the tasks table.
pub fn tasks(pool: &PgPool) -> ScopedStore<Task> {
    ScopedStore::new("tasks", "task", pool.clone())
}

#[derive(Debug, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub project_id: Option<Uuid>,
    pub assignee_id: Option<Uuid>,
    pub due_on: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<String>,
    pub assignee_id: Option<Uuid>,
    pub due_on: Option<NaiveDate>,
}

pub async fn insert(
    pool: &PgPool,
    tenant_id: Option<Uuid>,
    new: NewTask,
) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (id, tenant_id, project_id, title, status, assignee_id, due_on)
        VALUES ($1, $2, $3, $4, 'open', $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(new.project_id)
    .bind(new.title)
    .bind(new.assignee_id)
    .bind(new.due_on)
    .fetch_one(pool)
    .await
}

/// Update by primary key. The access decision made by the caller is the
/// authorization point; this statement does not re-filter by tenant.
pub async fn update(pool: &PgPool, id: Uuid, patch: TaskPatch) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        r#"
        UPDATE tasks
        SET title = COALESCE($2, title),
            status = COALESCE($3, status),
            assignee_id = COALESCE($4, assignee_id),
            due_on = COALESCE($5, due_on),
            updated_at = now()
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(patch.title)
    .bind(patch.status)
    .bind(patch.assignee_id)
    .bind(patch.due_on)
    .fetch_one(pool)
    .await
}

pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE tasks SET deleted_at = now(), updated_at = now() WHERE id = $1 AND deleted_at IS NULL")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
