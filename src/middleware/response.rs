use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::json;

/// Machine-readable signal that degraded isolation guarantees were
/// exercised to satisfy the request. Operators track this header during the
/// migration window to find legacy data to backfill before going strict.
pub const TENANCY_WARNING_HEADER: HeaderName = HeaderName::from_static("x-tenancy-warning");

/// Success envelope with an optional tenancy warning riding alongside.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub status_code: Option<StatusCode>,
    pub warning: Option<&'static str>,
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data,
            status_code: None,
            warning: None,
        }
    }

    pub fn with_status(data: T, status_code: StatusCode) -> Self {
        Self {
            data,
            status_code: Some(status_code),
            warning: None,
        }
    }

    pub fn created(data: T) -> Self {
        Self::with_status(data, StatusCode::CREATED)
    }

    pub fn no_content() -> ApiResponse<()> {
        ApiResponse::with_status((), StatusCode::NO_CONTENT)
    }

    pub fn with_warning(mut self, reason: &'static str) -> Self {
        self.warning = Some(reason);
        self
    }

    pub fn maybe_warning(mut self, reason: Option<&'static str>) -> Self {
        self.warning = reason;
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status_code.unwrap_or(StatusCode::OK);

        let mut response = if status == StatusCode::NO_CONTENT {
            status.into_response()
        } else {
            let data_value = match serde_json::to_value(&self.data) {
                Ok(value) => value,
                Err(e) => {
                    tracing::error!("failed to serialize response data: {}", e);
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({
                            "success": false,
                            "error": "failed to serialize response data"
                        })),
                    )
                        .into_response();
                }
            };

            (
                status,
                Json(json!({
                    "success": true,
                    "data": data_value
                })),
            )
                .into_response()
        };

        if let Some(reason) = self.warning {
            if let Ok(value) = HeaderValue::from_str(reason) {
                response.headers_mut().insert(TENANCY_WARNING_HEADER, value);
            }
        }

        response
    }
}
