//! Utilities: error re-exports, response helpers, logging, input validation

pub mod logger;
pub mod validation;

use axum::Json;
use http::StatusCode;
use serde::Serialize;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

/// Handler result carrying the `{success, data}` envelope
pub type ApiResult<T> = AppResult<Json<ApiResponse<T>>>;

/// Handler result for 201 Created
pub type CreatedResult<T> = AppResult<(StatusCode, Json<ApiResponse<T>>)>;

/// Wrap `data` in a success envelope
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

/// Success envelope with 201 Created
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<ApiResponse<T>>) {
    (StatusCode::CREATED, Json(ApiResponse::success(data)))
}

/// `?id=` for DELETE routes addressed by query string
#[derive(Debug, Default, serde::Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn require(self) -> AppResult<String> {
        self.id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::required("id"))
    }
}
