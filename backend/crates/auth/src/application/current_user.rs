//! Current User Use Case
//!
//! Loads the caller's stored record from verified claims.

use std::sync::Arc;

use crate::domain::entity::{
    claims::Claims,
    user::{Dashboard, User},
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
pub struct CurrentUserOutput {
    pub user: User,
    pub dashboard: Dashboard,
    pub permissions: &'static [&'static str],
}

pub struct CurrentUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, claims: &Claims) -> AuthResult<CurrentUserOutput> {
        let user = self
            .user_repo
            .find_by_id(claims.user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(CurrentUserOutput {
            dashboard: user.dashboard(),
            permissions: user.permissions(),
            user,
        })
    }
}
