//! Role Gating
//!
//! Checks run after a token has been verified.

use crate::domain::entity::claims::Claims;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

/// Allow only callers holding `required`
pub fn authorize(claims: &Claims, required: UserRole) -> AuthResult<()> {
    authorize_any(claims, &[required])
}

/// Allow callers holding any of `allowed`
pub fn authorize_any(claims: &Claims, allowed: &[UserRole]) -> AuthResult<()> {
    if allowed.contains(&claims.role) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}
