//! Status and probe endpoints.

use crate::error::AppError;
use crate::models::StatusResponse;
use axum::Json;

/// GET /api/v1/status
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "OK".to_string(),
    })
}

/// GET /api/v1/unauthorized: always 401
pub async fn unauthorized() -> AppError {
    AppError::Unauthorized("Unauthorized".to_string())
}

/// GET /api/v1/forbidden: always 403
pub async fn forbidden() -> AppError {
    AppError::Forbidden("Forbidden".to_string())
}
