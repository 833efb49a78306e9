//! Unified error handling for HTTP handlers.
//!
//! Provides a unified `AppError` type mapping every layer's error to an HTTP
//! status. All route handlers return `Result<T, AppError>`. Validation
//! problems keep their messages (they are caller-correctable); store and
//! upstream failures are logged here and answered with a generic message so
//! internals never leak to clients.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use shelfsense_core::{ExtractionError, NormalizeError};

use crate::db::StoreError;
use crate::services::interpreter::InterpreterError;
use crate::services::recipes::RecipeError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Item input failed normalization.
    #[error("Validation error: {0}")]
    Validation(#[from] NormalizeError),

    /// The interpreter's output was unusable.
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Pantry store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Transcript interpretation collaborator failed.
    #[error("Interpreter error: {0}")]
    Interpreter(#[from] InterpreterError),

    /// Recipe search collaborator failed.
    #[error("Recipe search error: {0}")]
    Recipes(#[from] RecipeError),

    /// A feature's collaborator is not configured on this deployment.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(
            self,
            Self::Store(StoreError::Unavailable(_) | StoreError::DataCorruption(_))
                | Self::Interpreter(_)
                | Self::Recipes(_)
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Validation(_) | Self::Extraction(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Store(err) => match err {
                StoreError::UserNotFound(_) | StoreError::ItemNotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                StoreError::Unavailable(_) | StoreError::DataCorruption(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Interpreter(_) | Self::Recipes(_) => StatusCode::BAD_GATEWAY,
            Self::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Store(StoreError::Unavailable(_) | StoreError::DataCorruption(_)) => {
                "Internal server error".to_string()
            }
            Self::Interpreter(_) | Self::Recipes(_) => "External service error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotConfigured("transcript interpreter");
        assert_eq!(err.to_string(), "transcript interpreter is not configured");

        let err = AppError::BadRequest("userId is required".to_string());
        assert_eq!(err.to_string(), "Bad request: userId is required");
    }

    #[test]
    fn test_validation_errors_are_bad_request() {
        let err = shelfsense_core::PantryItem::normalize(&shelfsense_core::RawItemInput {
            food_item: "milk".to_string(),
            quantity: "one".into(),
            unit: String::new(),
            expiration_date: "01/15/2024".to_string(),
        })
        .expect_err("bad quantity");

        assert_eq!(get_status(AppError::Validation(err)), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_lookup_failures_are_not_found() {
        assert_eq!(
            get_status(AppError::Store(StoreError::UserNotFound("x".into()))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Store(StoreError::ItemNotFound {
                user: "x".into(),
                name: "kale".into()
            })),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_store_failures_are_internal_and_sanitized() {
        let err = AppError::Store(StoreError::Unavailable(sqlx::Error::PoolTimedOut));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_collaborator_failures_are_bad_gateway() {
        let err = AppError::Recipes(RecipeError::Api {
            status: 402,
            message: "quota exceeded".to_string(),
        });
        assert_eq!(get_status(err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_not_configured_is_service_unavailable() {
        assert_eq!(
            get_status(AppError::NotConfigured("recipe search")),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
