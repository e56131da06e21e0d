//! Catalog Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind, validation::ValidationError};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0}")]
    MissingFields(&'static str),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Product not found")]
    NotFound,

    /// Row that no longer decodes into an entity
    #[error("Corrupt product row {id}: {reason}")]
    CorruptRow { id: i64, reason: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::MissingFields(_) | CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::NotFound => ErrorKind::NotFound,
            CatalogError::CorruptRow { .. }
            | CatalogError::Database(_)
            | CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Server-side failures never expose their detail
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::InternalServerError => AppError::internal("Internal server error"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::CorruptRow { id, reason } => {
                tracing::error!(product_id = id, reason = %reason, "Corrupt product row");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
