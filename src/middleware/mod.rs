pub mod auth;
pub mod request_id;
pub mod response;
pub mod tenant_context;

pub use auth::jwt_auth_middleware;
pub use request_id::{request_id_middleware, RequestId};
pub use response::{ApiResponse, ApiResult, TENANCY_WARNING_HEADER};
pub use tenant_context::{tenant_context_middleware, RequestMeta, TENANT_OVERRIDE_HEADER};
