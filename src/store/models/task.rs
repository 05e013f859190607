use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::tenancy::TenantScoped;

/// A null `tenant_id` marks a row created before tenant isolation existed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub project_id: Option<Uuid>,
    pub title: String,
    pub status: String,
    pub assignee_id: Option<Uuid>,
    pub due_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TenantScoped for Task {
    fn tenant_id(&self) -> Option<Uuid> {
        self.tenant_id
    }
    fn resource_id(&self) -> Uuid {
        self.id
    }
}
