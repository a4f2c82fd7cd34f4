use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::validation::ValidationError;

pub const RESTAURANT_NOT_FOUND: &str = "Restaurant not found";
pub const VALIDATION_ERRORS: &str = "validation errors";

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error response type for rejected writes
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<String>,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Maps each failure onto its status code and fixed JSON body. Validation
/// failures all render the same body whatever their cause.
#[derive(Debug)]
pub enum ApiError {
    /// No restaurant with this id
    RestaurantNotFound(String),
    /// Rejected restaurant pizza write
    Validation(ValidationError),
    /// Database operation error
    DatabaseError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::RestaurantNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    error: RESTAURANT_NOT_FOUND.to_string(),
                }),
            )
                .into_response(),
            ApiError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                Json(ValidationErrorResponse {
                    errors: vec![VALIDATION_ERRORS.to_string()],
                }),
            )
                .into_response(),
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: format!("Database error: {}", err),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}
