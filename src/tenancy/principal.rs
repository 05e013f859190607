use uuid::Uuid;

use crate::auth::Claims;

/// Authenticated actor, owned by the auth layer and read-only here.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: Uuid,
    /// Home tenant. Null for pre-isolation accounts and for platform
    /// operators not attached to any tenant.
    pub home_tenant_id: Option<Uuid>,
    /// Platform operators may select an arbitrary effective tenant via the
    /// override header; nobody else can.
    pub privileged: bool,
}

impl From<Claims> for Principal {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            home_tenant_id: claims.tenant,
            privileged: claims.privileged,
        }
    }
}
