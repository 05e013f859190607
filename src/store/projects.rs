use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::Project;
use super::scoped::ScopedStore;

/// Engine adapter for the projects table.
pub fn projects(pool: &PgPool) -> ScopedStore<Project> {
    ScopedStore::new("projects", "project", pool.clone())
}

#[derive(Debug, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub client_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub client_id: Option<Uuid>,
    pub archived: Option<bool>,
}

pub async fn insert(
    pool: &PgPool,
    tenant_id: Option<Uuid>,
    new: NewProject,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        INSERT INTO projects (id, tenant_id, client_id, name, archived)
        VALUES ($1, $2, $3, $4, false)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(tenant_id)
    .bind(new.client_id)
    .bind(new.name)
    .fetch_one(pool)
    .await
}

pub async fn update(pool: &PgPool, id: Uuid, patch: ProjectPatch) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(
        r#"
        UPDATE projects
        SET name = COALESCE($2, name),
            client_id = COALESCE($3, client_id),
            archived = COALESCE($4, archived),
            updated_at = now()
        WHERE id = $1 AND deleted_at IS NULL
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(patch.name)
    .bind(patch.client_id)
    .bind(patch.archived)
    .fetch_one(pool)
    .await
}

pub async fn soft_delete(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE projects SET deleted_at = now(), updated_at = now() WHERE id = $1 AND deleted_at IS NULL")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
