//! User Name Value Object
//!
//! The login handle. Stored exactly as entered (after trimming and NFKC
//! normalization); uniqueness is enforced by the store.

use kernel::error::validation::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 64;

/// Validated user name
///
/// # Invariants
/// - Non-empty after trimming
/// - At most `USER_NAME_MAX_LENGTH` characters
/// - No whitespace or control characters inside
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let normalized: String = raw.as_ref().trim().nfkc().collect();

        if normalized.is_empty() {
            return Err(ValidationError::new("username", "Username cannot be empty"));
        }

        let length = normalized.chars().count();
        if length > USER_NAME_MAX_LENGTH {
            return Err(ValidationError::new(
                "username",
                format!("Username must be at most {USER_NAME_MAX_LENGTH} characters (got {length})"),
            ));
        }

        if normalized
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(ValidationError::new(
                "username",
                "Username cannot contain whitespace",
            ));
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for UserName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserName").field(&self.0).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_names() {
        assert_eq!(UserName::new("alice").unwrap().as_str(), "alice");
        assert_eq!(UserName::new("  bob  ").unwrap().as_str(), "bob");
        assert_eq!(UserName::new("Bob_99").unwrap().as_str(), "Bob_99");
    }

    #[test]
    fn test_empty_user_name() {
        let err = UserName::new("   ").unwrap_err();
        assert_eq!(err.field(), "username");
    }

    #[test]
    fn test_too_long_user_name() {
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
        assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_inner_whitespace_rejected() {
        assert!(UserName::new("al ice").is_err());
        assert!(UserName::new("al\tice").is_err());
    }

    #[test]
    fn test_nfkc_normalization() {
        // Fullwidth letters collapse to ASCII
        assert_eq!(UserName::new("ａｌｉｃｅ").unwrap().as_str(), "alice");
    }

    #[test]
    fn test_serde_validates() {
        let ok: UserName = serde_json::from_str("\"carol\"").unwrap();
        assert_eq!(ok.as_str(), "carol");
        assert!(serde_json::from_str::<UserName>("\"\"").is_err());
    }
}
