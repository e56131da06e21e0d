//! Validation Error
//!
//! Raised by entity constructors and setters when an invariant would be
//! violated. Callers translate it into a 400 response.

use std::borrow::Cow;

use thiserror::Error;

use super::app_error::AppError;

/// A named invariant violation on a single field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    field: &'static str,
    message: Cow<'static, str>,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    /// Field that failed validation
    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::bad_request(err.message.clone()).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new("price", "Price cannot be negative");
        assert_eq!(err.field(), "price");
        assert_eq!(err.to_string(), "Price cannot be negative");
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = ValidationError::new("stock", "Stock cannot be negative").into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.message(), "Stock cannot be negative");
    }
}
