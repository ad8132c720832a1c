//! Grocery Error Types
//!
//! Grocery-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Grocery-specific result type alias
pub type GroceryResult<T> = Result<T, GroceryError>;

#[derive(Debug, Error)]
pub enum GroceryError {
    /// Missing, or owned by another user
    #[error("Grocery item not found")]
    NotFound,

    /// Path id is not a UUID
    #[error("Invalid grocery item ID")]
    InvalidId,

    /// Input failed validation
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GroceryError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GroceryError::NotFound => ErrorKind::NotFound,
            GroceryError::InvalidId | GroceryError::Validation(_) => ErrorKind::BadRequest,
            GroceryError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::Io(_)) => {
                ErrorKind::ServiceUnavailable
            }
            GroceryError::Database(_) | GroceryError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError, keeping server-side details out of the body
    pub fn to_app_error(&self) -> AppError {
        match self {
            GroceryError::Database(_) | GroceryError::Internal(_) => {
                AppError::new(self.kind(), self.kind().as_str())
            }
            GroceryError::InvalidId => AppError::new(self.kind(), self.to_string())
                .with_action("Use the id returned when the item was created"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            GroceryError::Database(e) => {
                tracing::error!(error = %e, "Grocery database error");
            }
            GroceryError::Internal(msg) => {
                tracing::error!(message = %msg, "Grocery internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Grocery error");
            }
        }
    }
}

impl IntoResponse for GroceryError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for GroceryError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => GroceryError::Validation(err.message().to_owned()),
            _ => GroceryError::Internal(err.to_string()),
        }
    }
}
