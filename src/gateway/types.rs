//! API response envelope and error codes
//!
//! Every endpoint answers with `ApiResponse<T> { code, msg, data }`:
//! code 0 on success, a stable non-zero code on failure. `ApiError` is the
//! handler-side error carrier; it renders to the same envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::checkout::CheckoutError;

/// Unified API response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    /// Response data (only present when code == 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

/// Standard API error codes
pub mod error_codes {
    // Success
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INSUFFICIENT_STOCK: i32 = 1002;

    // Auth errors (2xxx)
    pub const MISSING_AUTH: i32 = 2001;
    pub const AUTH_FAILED: i32 = 2002;
    pub const FORBIDDEN: i32 = 2003;

    // Resource errors (4xxx)
    pub const NOT_FOUND: i32 = 4001;
    pub const CONFLICT: i32 = 4091;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
}

/// Handler error: HTTP status plus envelope code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_PARAMETER,
            msg,
        )
    }

    pub fn missing_auth(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::MISSING_AUTH, msg)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, error_codes::AUTH_FAILED, msg)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, error_codes::FORBIDDEN, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, msg)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, error_codes::CONFLICT, msg)
    }

    pub fn db_error(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            error_codes::INTERNAL_ERROR,
            msg,
        )
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            msg,
        )
    }

    /// Convenience for `return ApiError::...(..).into_err();`
    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiResponse::<()>::error(self.code, self.msg)),
        )
            .into_response()
    }
}

/// Standard handler result: status + enveloped payload, or an ApiError
pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

pub fn created<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::CREATED, Json(ApiResponse::success(data))))
}

impl From<CheckoutError> for ApiError {
    fn from(e: CheckoutError) -> Self {
        match &e {
            CheckoutError::EmptyCart
            | CheckoutError::InvalidQuantity { .. }
            | CheckoutError::UnknownStore(_) => ApiError::bad_request(e.to_string()),
            CheckoutError::InsufficientStock { .. } => ApiError::new(
                StatusCode::CONFLICT,
                error_codes::INSUFFICIENT_STOCK,
                e.to_string(),
            ),
            CheckoutError::Storage(inner) => {
                tracing::error!("checkout storage failure: {}", inner);
                ApiError::db_error("Order could not be placed, please retry")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match &e {
            AuthError::EmailTaken => ApiError::conflict(e.to_string()),
            AuthError::InvalidCredentials => ApiError::unauthorized(e.to_string()),
            AuthError::Token(_) => ApiError::unauthorized("Invalid or expired token"),
            AuthError::Database(inner) => {
                tracing::error!("auth storage failure: {}", inner);
                ApiError::db_error("Internal error")
            }
            AuthError::Hash(inner) => {
                tracing::error!("password hashing failure: {}", inner);
                ApiError::db_error("Internal error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let resp = ApiResponse::success(5);
        assert_eq!(resp.code, error_codes::SUCCESS);
        assert_eq!(resp.msg, "ok");
        assert_eq!(resp.data, Some(5));
    }

    #[test]
    fn test_error_envelope_has_no_data() {
        let resp = ApiResponse::<()>::error(error_codes::NOT_FOUND, "missing");
        assert_eq!(resp.code, error_codes::NOT_FOUND);
        assert!(resp.data.is_none());

        let json = serde_json::to_value(&resp).expect("serializes");
        assert!(
            json.get("data").is_none(),
            "null data is omitted from the wire format"
        );
    }

    #[test]
    fn test_insufficient_stock_maps_to_conflict() {
        let err: ApiError = CheckoutError::InsufficientStock {
            product_id: 3,
            available: 1,
        }
        .into();
        assert_eq!(err.status, StatusCode::CONFLICT);
        assert_eq!(err.code, error_codes::INSUFFICIENT_STOCK);
        assert!(err.msg.contains('3'));
    }

    #[test]
    fn test_storage_error_is_not_leaked() {
        let err: ApiError = CheckoutError::Storage(sqlx::Error::PoolTimedOut).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            !err.msg.to_lowercase().contains("pool"),
            "driver detail must not reach the client"
        );
    }

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let err: ApiError = CheckoutError::UnknownStore(9).into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, error_codes::INVALID_PARAMETER);
    }
}
