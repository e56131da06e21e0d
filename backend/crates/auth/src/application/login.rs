//! Login Use Case
//!
//! Verifies credentials and issues a bearer token.

use std::sync::{Arc, OnceLock};

use crate::application::{config::AuthConfig, token::TokenService};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Digest checked when the username is unknown, so that both failure paths
/// pay for one password verification
fn decoy_digest() -> Option<&'static UserPassword> {
    static DECOY: OnceLock<Option<UserPassword>> = OnceLock::new();
    DECOY
        .get_or_init(|| {
            let raw = RawPassword::new("decoy-password".to_string()).ok()?;
            UserPassword::from_raw(&raw, None).ok()
        })
        .as_ref()
}

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub token: String,
    pub user: User,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>, tokens: Arc<TokenService>) -> Self {
        Self {
            user_repo,
            config,
            tokens,
        }
    }

    /// Look up the user and check the password
    ///
    /// Unknown user and wrong password both yield `None`.
    pub async fn authenticate(&self, username: &str, password: String) -> AuthResult<Option<User>> {
        let Ok(username) = UserName::new(username) else {
            return Ok(None);
        };
        let Ok(raw_password) = RawPassword::new(password) else {
            return Ok(None);
        };

        let Some(mut user) = self.user_repo.find_by_username(&username).await? else {
            if let Some(decoy) = decoy_digest() {
                std::hint::black_box(decoy.verify(&raw_password, self.config.pepper()));
            }
            return Ok(None);
        };

        if !user.password().verify(&raw_password, self.config.pepper()) {
            return Ok(None);
        }

        if user.password().needs_rehash() {
            let upgraded = UserPassword::from_raw(&raw_password, self.config.pepper())?;
            user.set_password(upgraded);
            self.user_repo.update(&user).await?;
            tracing::info!(username = %user.username(), "Upgraded legacy password digest");
        }

        Ok(Some(user))
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user = self
            .authenticate(&input.username, input.password)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.tokens.issue(&user)?;

        tracing::info!(
            username = %user.username(),
            role = %user.role(),
            "User logged in"
        );

        Ok(LoginOutput { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoy_digest_is_current_and_rejects() {
        let decoy = decoy_digest().unwrap();
        assert!(!decoy.needs_rehash());

        let raw = RawPassword::new("secret".to_string()).unwrap();
        assert!(!decoy.verify(&raw, None));
        assert!(std::ptr::eq(decoy, decoy_digest().unwrap()));
    }
}
