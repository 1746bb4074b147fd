//! Error types for Readspace server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes returned alongside HTTP statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchUser = 4,
    NoSuchSeat = 5,
    SeatUnavailable = 6,
    NoSuchNotification = 7,
    AlreadyActedUpon = 8,
    Duplicate = 9,
    BadValue = 10,
    NoSuchBook = 11,
    NoCopiesAvailable = 12,
    NoSuchData = 13,
}

/// Main application error type.
///
/// Not-found, conflict and business-rule errors carry the domain
/// [`ErrorCode`] so the body says which resource or rule failed, not
/// just the HTTP class.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {1}")]
    NotFound(ErrorCode, String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {1}")]
    Conflict(ErrorCode, String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Business rule violation: {1}")]
    BusinessRule(ErrorCode, String),
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(code, msg) => (StatusCode::NOT_FOUND, *code, msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(code, msg) => (StatusCode::CONFLICT, *code, msg.clone()),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::BusinessRule(code, msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, *code, msg.clone())
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn conflict_carries_its_domain_code() {
        let (status, body) = body_json(AppError::Conflict(
            ErrorCode::SeatUnavailable,
            "Seat is not available".to_string(),
        ))
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], ErrorCode::SeatUnavailable as u32);
        assert_eq!(body["error"], "SeatUnavailable");
    }

    #[tokio::test]
    async fn acted_upon_and_duplicate_conflicts_are_distinguishable() {
        let (_, acted) = body_json(AppError::Conflict(
            ErrorCode::AlreadyActedUpon,
            "Notification has already been acted upon".to_string(),
        ))
        .await;
        let (_, duplicate) = body_json(AppError::Conflict(
            ErrorCode::Duplicate,
            "Login already exists".to_string(),
        ))
        .await;

        assert_ne!(acted["code"], duplicate["code"]);
        assert_eq!(acted["code"], ErrorCode::AlreadyActedUpon as u32);
    }

    #[tokio::test]
    async fn not_found_keeps_the_resource_code() {
        let (status, body) = body_json(AppError::NotFound(
            ErrorCode::NoSuchSeat,
            "Seat with id 7 not found".to_string(),
        ))
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], ErrorCode::NoSuchSeat as u32);
    }

    #[tokio::test]
    async fn business_rule_maps_to_unprocessable() {
        let (status, body) = body_json(AppError::BusinessRule(
            ErrorCode::NoCopiesAvailable,
            "No copies of this book are available".to_string(),
        ))
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], ErrorCode::NoCopiesAvailable as u32);
    }
}
