//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::user::User;
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user and return the assigned id
    ///
    /// Returns `Ok(None)` when the user name is already taken.
    async fn create(&self, user: &User) -> AuthResult<Option<UserId>>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    /// Find user by user name (exact match)
    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>>;

    /// Persist mutable fields (email, password digest, customer profile)
    async fn update(&self, user: &User) -> AuthResult<()>;
}
