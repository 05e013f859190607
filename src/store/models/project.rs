use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::tenancy::TenantScoped;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub name: String,
    pub archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl TenantScoped for Project {
    fn tenant_id(&self) -> Option<Uuid> {
        self.tenant_id
    }
    fn resource_id(&self) -> Uuid {
        self.id
    }
}
