//! Token Service
//!
//! Issues and verifies bearer tokens for stored users.

use chrono::{DateTime, Utc};
use platform::token::TokenSigner;

use crate::application::config::AuthConfig;
use crate::domain::entity::{claims::Claims, user::User};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct TokenService {
    signer: TokenSigner,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            signer: TokenSigner::new(&config.token_secret),
            ttl_secs: config.token_ttl_secs(),
        }
    }

    /// Issue a token expiring one TTL from now
    pub fn issue(&self, user: &User) -> AuthResult<String> {
        self.issue_at(user, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, user: &User, now: DateTime<Utc>) -> AuthResult<String> {
        let user_id = user
            .id()
            .ok_or_else(|| AuthError::Internal("Cannot issue a token for an unsaved user".into()))?;

        let claims = Claims {
            user_id,
            username: user.username().to_string(),
            role: user.role(),
            exp: now.timestamp() + self.ttl_secs,
        };

        Ok(self.signer.sign(&claims)?)
    }

    /// Verify a raw token (optionally `Bearer `-prefixed)
    pub fn verify(&self, raw: &str) -> AuthResult<Claims> {
        if platform::token::strip_bearer(raw).is_empty() {
            return Err(AuthError::MissingToken);
        }
        Ok(self.signer.verify(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
        user_role::UserRole,
    };
    use chrono::Duration;
    use kernel::id::UserId;

    fn stored_user(role: UserRole) -> User {
        let raw = RawPassword::new("pw".to_string()).unwrap();
        User::new(
            UserName::new("bob").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            None,
            role,
        )
        .with_id(UserId::new(42))
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = TokenService::new(&AuthConfig::with_random_secret());
        let token = tokens.issue(&stored_user(UserRole::Admin)).unwrap();

        let claims = tokens.verify(&format!("Bearer {token}")).unwrap();
        assert_eq!(claims.user_id, UserId::new(42));
        assert_eq!(claims.username, "bob");
        assert_eq!(claims.role, UserRole::Admin);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let tokens = TokenService::new(&AuthConfig::with_random_secret());
        let issued_at = Utc::now() - Duration::hours(25);
        let token = tokens.issue_at(&stored_user(UserRole::Customer), issued_at).unwrap();

        assert!(matches!(tokens.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = TokenService::new(&AuthConfig::from_secret("one"));
        let verifier = TokenService::new(&AuthConfig::from_secret("two"));
        let token = issuer.issue(&stored_user(UserRole::Customer)).unwrap();

        assert!(matches!(verifier.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_missing_token() {
        let tokens = TokenService::new(&AuthConfig::default());
        assert!(matches!(tokens.verify("  "), Err(AuthError::MissingToken)));
        assert!(matches!(tokens.verify("Bearer "), Err(AuthError::MissingToken)));
    }

    #[test]
    fn test_unsaved_user_cannot_get_token() {
        let raw = RawPassword::new("pw".to_string()).unwrap();
        let user = User::new(
            UserName::new("ghost").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            None,
            UserRole::Customer,
        );
        let tokens = TokenService::new(&AuthConfig::default());
        assert!(tokens.issue(&user).is_err());
    }
}
