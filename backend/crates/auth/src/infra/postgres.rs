//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::entity::user::{Account, AdminProfile, CustomerProfile, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Role-specific columns as stored
fn account_columns(account: &Account) -> AuthResult<(i32, Option<&str>)> {
    match account {
        Account::Customer(profile) => {
            let points = i32::try_from(profile.loyalty_points()).map_err(|_| {
                AuthError::Internal(format!(
                    "Loyalty points out of range: {}",
                    profile.loyalty_points()
                ))
            })?;
            Ok((points, profile.shipping_address()))
        }
        Account::Admin(_) => Ok((0, None)),
    }
}

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &User) -> AuthResult<Option<UserId>> {
        let (loyalty_points, shipping_address) = account_columns(user.account())?;

        let id: Option<i64> = sqlx::query_scalar(
            r#"
            INSERT INTO users (
                username,
                password_hash,
                email,
                role,
                loyalty_points,
                shipping_address,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (username) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(user.username().as_str())
        .bind(user.password().as_str())
        .bind(user.email().map(Email::as_str))
        .bind(user.role().code())
        .bind(loyalty_points)
        .bind(shipping_address)
        .bind(user.created_at())
        .fetch_optional(&self.pool)
        .await?;

        Ok(id.map(UserId::new))
    }

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                email,
                role,
                loyalty_points,
                shipping_address,
                created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_username(&self, username: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                id,
                username,
                password_hash,
                email,
                role,
                loyalty_points,
                shipping_address,
                created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let user_id = user
            .id()
            .ok_or_else(|| AuthError::Internal("Cannot update an unsaved user".into()))?;
        let (loyalty_points, shipping_address) = account_columns(user.account())?;

        sqlx::query(
            r#"
            UPDATE users SET
                password_hash = $2,
                email = $3,
                loyalty_points = $4,
                shipping_address = $5
            WHERE id = $1
            "#,
        )
        .bind(user_id.get())
        .bind(user.password().as_str())
        .bind(user.email().map(Email::as_str))
        .bind(loyalty_points)
        .bind(shipping_address)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    email: Option<String>,
    role: String,
    loyalty_points: i32,
    shipping_address: Option<String>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let username = UserName::new(&self.username)
            .map_err(|e| AuthError::Internal(format!("Invalid username: {}", e)))?;

        let password = UserPassword::from_db(self.password_hash)?;

        let role: UserRole = self
            .role
            .parse()
            .map_err(|e| AuthError::Internal(format!("Invalid role: {}", e)))?;

        let account = match role {
            UserRole::Customer => {
                let points = u32::try_from(self.loyalty_points).map_err(|_| {
                    AuthError::Internal(format!(
                        "Invalid loyalty points for user {}: {}",
                        self.id, self.loyalty_points
                    ))
                })?;
                let profile = CustomerProfile::new(points, self.shipping_address)
                    .map_err(|e| AuthError::Internal(format!("Invalid customer profile: {}", e)))?;
                Account::Customer(profile)
            }
            UserRole::Admin => Account::Admin(AdminProfile::default()),
        };

        Ok(User::restore(
            UserId::new(self.id),
            username,
            password,
            self.email.map(Email::from_db),
            self.created_at,
            account,
        ))
    }
}
