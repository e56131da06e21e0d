//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind, validation::ValidationError};
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token refers to a user that no longer exists
    #[error("User not found")]
    UserNotFound,

    #[error("Username already exists")]
    UserNameTaken,

    /// Unknown user or wrong password; the two are not distinguished
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Authorization token is missing")]
    MissingToken,

    /// Malformed, tampered or expired token
    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("{0}")]
    MissingFields(&'static str),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound
            | AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNameTaken | AuthError::MissingFields(_) | AuthError::Validation(_) => {
                ErrorKind::BadRequest
            }
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures never expose their detail.
    pub fn to_app_error(&self) -> AppError {
        match self.kind() {
            ErrorKind::InternalServerError => AppError::internal("Internal server error"),
            kind => AppError::new(kind, self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken | AuthError::Forbidden => {
                tracing::warn!(error = %self, "Request rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired | TokenError::Invalid => AuthError::InvalidToken,
            TokenError::Signing(msg) => AuthError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(AuthError::InvalidToken.kind().status_code(), 401);
        assert_eq!(AuthError::Forbidden.kind().status_code(), 403);
        assert_eq!(AuthError::UserNameTaken.kind().status_code(), 400);
        assert_eq!(
            AuthError::Internal("boom".into()).kind().status_code(),
            500
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let app = AuthError::Internal("connection refused at 10.0.0.3".into()).to_app_error();
        assert_eq!(app.message(), "Internal server error");
    }

    #[test]
    fn test_duplicate_username_message() {
        let app = AuthError::UserNameTaken.to_app_error();
        assert_eq!(app.message(), "Username already exists");
    }

    #[test]
    fn test_expired_token_maps_to_invalid() {
        let err: AuthError = TokenError::Expired.into();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
