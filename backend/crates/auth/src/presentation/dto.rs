//! API DTOs (Data Transfer Objects)
//!
//! Request fields are optional so that a missing field is reported as a
//! 400 with a readable message instead of a deserialization rejection.

use serde::{Deserialize, Serialize};

use crate::domain::entity::user::{Dashboard, UserDict};
use crate::domain::value_object::user_role::UserRole;

// ============================================================================
// Register
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user_id: i64,
    pub role: UserRole,
}

// ============================================================================
// Login
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: LoginUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginUser {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
}

// ============================================================================
// Current user
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user: UserDict,
    pub dashboard: Dashboard,
    pub permissions: &'static [&'static str],
}

/// Both fields present and non-blank
pub(crate) fn credentials(
    username: Option<String>,
    password: Option<String>,
) -> Option<(String, String)> {
    match (username, password) {
        (Some(u), Some(p)) if !u.trim().is_empty() && !p.is_empty() => Some((u, p)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_fields() {
        assert!(credentials(Some("a".into()), Some("pw".into())).is_some());
        assert!(credentials(Some("a".into()), None).is_none());
        assert!(credentials(None, Some("pw".into())).is_none());
        assert!(credentials(Some("  ".into()), Some("pw".into())).is_none());
        assert!(credentials(Some("a".into()), Some(String::new())).is_none());
    }

    #[test]
    fn test_register_request_tolerates_missing_fields() {
        let req: RegisterRequest = serde_json::from_str(r#"{"username":"alice"}"#).unwrap();
        assert_eq!(req.username.as_deref(), Some("alice"));
        assert!(req.password.is_none());
        assert!(req.role.is_none());
    }
}
