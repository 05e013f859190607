// HTTP API error types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP-facing error with status code and client-safe message.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    // 401 Unauthorized
    Unauthorized(String),
    // 403 Forbidden
    Forbidden(String),
    // 404 Not Found
    NotFound(String),
    // 409 Conflict
    Conflict(String),
    // 500 Internal Server Error
    InternalServerError(String),
    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InternalServerError(msg)
            | ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Stable error code for client handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "error": true,
            "message": self.message(),
            "code": self.error_code(),
        })
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::not_found("record not found"),
            sqlx::Error::PoolTimedOut => {
                ApiError::service_unavailable("database temporarily unavailable")
            }
            other => {
                // Never expose SQL details to clients.
                tracing::error!("database error: {}", other);
                ApiError::internal_server_error("an error occurred while processing your request")
            }
        }
    }
}

impl From<crate::tenancy::context::ResolveError> for ApiError {
    fn from(err: crate::tenancy::context::ResolveError) -> Self {
        use crate::tenancy::context::ResolveError;
        match err {
            // A mistyped override must be a hard error, not a silent
            // fall-through to an unscoped context.
            ResolveError::UnknownTenant(id) => {
                ApiError::forbidden(format!("tenant '{}' does not exist", id))
            }
            ResolveError::Directory(e) => {
                tracing::error!("tenant directory lookup failed: {}", e);
                ApiError::internal_server_error("failed to resolve tenant context")
            }
        }
    }
}

impl From<crate::tenancy::access::AccessError> for ApiError {
    fn from(err: crate::tenancy::access::AccessError) -> Self {
        let crate::tenancy::access::AccessError::Storage(e) = err;
        tracing::error!("resource lookup failed: {}", e);
        ApiError::internal_server_error("an error occurred while processing your request")
    }
}

impl From<crate::tenancy::cache::CacheError> for ApiError {
    fn from(err: crate::tenancy::cache::CacheError) -> Self {
        use crate::tenancy::cache::CacheError;
        match err {
            CacheError::NoWorkspace(tenant_id) => {
                ApiError::not_found(format!("no workspace configured for tenant '{}'", tenant_id))
            }
            CacheError::Source(e) => {
                tracing::error!("workspace lookup failed: {}", e);
                ApiError::internal_server_error("failed to resolve workspace")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
