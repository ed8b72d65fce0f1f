use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with, mapped onto the service's wire
/// contract. Bodies are plain text of the form `"<status> - <message>"`;
/// note that key failures deliberately answer with HTTP 404 while the body
/// says 401, matching the published behavior of the API.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Access key missing")]
    KeyMissing,

    #[error("Invalid access key")]
    KeyInvalid,

    #[error("Course not found")]
    NotFound,

    #[error("Non-integer course id")]
    InvalidId,

    #[error("Duplicate course id")]
    Conflict,

    #[error("Invalid or incomplete course submission")]
    Unprocessable,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::KeyMissing => {
                (StatusCode::NOT_FOUND, "401 - Please supply access key".to_string())
            }
            AppError::KeyInvalid => {
                (StatusCode::NOT_FOUND, "401 - Invalid key".to_string())
            }
            AppError::NotFound => {
                (StatusCode::NOT_FOUND, "404 - No course found".to_string())
            }
            AppError::InvalidId => (
                StatusCode::BAD_REQUEST,
                "400 - Course data in wrong format, needs to be integer value.".to_string(),
            ),
            AppError::Conflict => {
                (StatusCode::CONFLICT, "409 - Duplicate course ID".to_string())
            }
            AppError::Unprocessable => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "422 - Please supply course information in JSON format".to_string(),
            ),
            AppError::Database(e) => {
                error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "500 - Database error occurred".to_string(),
                )
            }
            AppError::Config(msg) => {
                error!("configuration error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "500 - Internal server error".to_string(),
                )
            }
        };

        (status, body).into_response()
    }
}
