//! Register Use Case
//!
//! Creates a new customer or admin account.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    /// Role code; customer when absent
    pub role: Option<String>,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: UserId,
    pub role: UserRole,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let username = UserName::new(&input.username)?;

        let role = match input.role.as_deref().map(str::trim) {
            None | Some("") => UserRole::default(),
            Some(code) => code.parse::<UserRole>()?,
        };

        let email = Email::parse_optional(input.email.as_deref())?;

        let raw_password = RawPassword::new(input.password)?;
        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let user = User::new(username, password, email, role);

        // The UNIQUE constraint decides; no read-then-write race
        let user_id = self
            .user_repo
            .create(&user)
            .await?
            .ok_or(AuthError::UserNameTaken)?;

        tracing::info!(
            user_id = %user_id,
            username = %user.username(),
            role = %role,
            "User registered"
        );

        Ok(RegisterOutput { user_id, role })
    }
}
