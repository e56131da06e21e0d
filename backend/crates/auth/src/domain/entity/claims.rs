//! Token Claims
//!
//! Payload of an issued bearer token. Carried in request extensions after
//! the token has been verified.

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: UserId,
    pub username: String,
    pub role: UserRole,
    /// Expiry as seconds since the Unix epoch
    pub exp: i64,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
