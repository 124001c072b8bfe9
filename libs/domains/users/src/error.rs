use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_config::Environment;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Name and email are required")]
    MissingRequiredFields,

    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("No fields to update")]
    EmptyUpdate,

    #[error("Invalid user ID format")]
    InvalidId,

    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            UserError::MissingRequiredFields => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Name and email are required", "data": null }),
            ),
            UserError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Validation failed", "errors": errors, "data": null }),
            ),
            UserError::EmptyUpdate => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "No fields to update", "data": null }),
            ),
            UserError::InvalidId => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "Invalid user ID format", "data": null }),
            ),
            UserError::NotFound(id) => {
                tracing::info!(user_id = %id, "User not found");
                (
                    StatusCode::NOT_FOUND,
                    json!({ "message": "User not found", "data": null }),
                )
            }
            UserError::DuplicateEmail(email) => {
                tracing::info!(email = %email, "Duplicate email rejected");
                (
                    StatusCode::CONFLICT,
                    json!({ "message": "Email already exists", "data": null }),
                )
            }
            UserError::Database(msg) => {
                tracing::error!("Database error: {}", msg);
                // Production responses stay opaque; the full detail is only
                // surfaced in development.
                let detail = if Environment::from_env().is_production() {
                    "Something went wrong"
                } else {
                    msg.as_str()
                };
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Server error", "serverMessage": detail, "data": null }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}
