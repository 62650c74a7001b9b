//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nutrition_coach_shared::types::{ErrorDetail, ErrorResponse};
use nutrition_coach_shared::validation::ValidationError;
use nutrition_coach_shared::PlanError;
use thiserror::Error;
use tracing::{error, warn};

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// One or more questionnaire fields failed validation
    #[error("Invalid profile: {} field(s) rejected", .0.len())]
    InvalidFields(Vec<ValidationError>),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Nutrition plan could not be calculated: {0}")]
    PlanNotComputable(#[from] PlanError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ApiError::InvalidFields(errors)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut field = None;
        let mut details = None;

        let (status, code, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::InvalidFields(errors) => {
                field = errors.first().map(|e| e.field.clone());
                details = Some(serde_json::Value::Array(
                    errors
                        .iter()
                        .map(|e| {
                            serde_json::json!({
                                "field": e.field,
                                "label": e.display_label,
                                "message": e.message,
                            })
                        })
                        .collect(),
                ));
                let message = errors
                    .first()
                    .map(|e| e.user_message())
                    .unwrap_or_else(|| "Invalid profile".to_string());
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            ApiError::PlanNotComputable(err) => {
                warn!(error = %err, "Nutrition plan not computable");
                details = Some(serde_json::json!({ "fields": err.fields() }));
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PLAN_NOT_COMPUTABLE",
                    err.to_string(),
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
                details,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
