use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::tenancy::TenantScoped;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TimeEntry {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub task_id: Option<Uuid>,
    pub user_id: Uuid,
    pub minutes: i32,
    pub entry_date: NaiveDate,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TenantScoped for TimeEntry {
    fn tenant_id(&self) -> Option<Uuid> {
        self.tenant_id
    }
    fn resource_id(&self) -> Uuid {
        self.id
    }
}
