//! Sales Error Types

use kernel::error::{app_error::AppError, kind::ErrorKind, validation::ValidationError};
use thiserror::Error;

pub type SalesResult<T> = Result<T, SalesError>;

#[derive(Debug, Error)]
pub enum SalesError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Order not found")]
    OrderNotFound,

    /// Row that no longer decodes into an entity
    #[error("Corrupt order row {id}: {reason}")]
    CorruptRow { id: i64, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SalesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SalesError::Validation(_) => ErrorKind::BadRequest,
            SalesError::OrderNotFound => ErrorKind::NotFound,
            SalesError::CorruptRow { .. } | SalesError::Database(_) | SalesError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::InternalServerError => AppError::internal("Internal server error"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    /// Storage failures at error level, the rest at debug
    pub(crate) fn log(&self) {
        match self {
            SalesError::Database(e) => {
                tracing::error!(error = %e, "Sales database error");
            }
            SalesError::CorruptRow { id, reason } => {
                tracing::error!(order_id = id, reason = %reason, "Corrupt order row");
            }
            SalesError::Internal(msg) => {
                tracing::error!(message = %msg, "Sales internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Sales error");
            }
        }
    }
}
