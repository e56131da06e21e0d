//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use kernel::error::validation::ValidationError;
use std::sync::Arc;

use crate::application::{
    CurrentUserUseCase, LoginInput, LoginUseCase, RegisterInput, RegisterUseCase,
    config::AuthConfig, token::TokenService,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, LoginUser, MeResponse, RegisterRequest, RegisterResponse,
    credentials,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
pub struct AuthAppState<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<U>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenService>,
}

impl<U> Clone for AuthAppState<U>
where
    U: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

fn body_error(rejection: JsonRejection) -> AuthError {
    AuthError::Validation(ValidationError::new("body", rejection.body_text()))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/register
pub async fn register<U>(
    State(state): State<AuthAppState<U>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    U: UserRepository + Send + Sync + 'static,
{
    let Json(req) = body.map_err(body_error)?;
    let (username, password) = credentials(req.username, req.password)
        .ok_or(AuthError::MissingFields("Username and password are required"))?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            username,
            password,
            email: req.email,
            role: req.role,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            user_id: output.user_id.get(),
            role: output.role,
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/login
pub async fn login<U>(
    State(state): State<AuthAppState<U>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let Json(req) = body.map_err(body_error)?;
    let (username, password) = credentials(req.username, req.password)
        .ok_or(AuthError::MissingFields("Username and password are required"))?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.tokens.clone(),
    );

    let output = use_case.execute(LoginInput { username, password }).await?;

    let id = output
        .user
        .id()
        .ok_or_else(|| AuthError::Internal("Stored user without id".into()))?;

    Ok(Json(LoginResponse {
        message: "Login successful",
        token: output.token,
        user: LoginUser {
            id: id.get(),
            username: output.user.username().to_string(),
            role: output.user.role(),
        },
    }))
}

// ============================================================================
// Current user
// ============================================================================

/// GET /api/me
pub async fn me<U>(
    State(state): State<AuthAppState<U>>,
    CurrentUser(claims): CurrentUser,
) -> AuthResult<Json<MeResponse>>
where
    U: UserRepository + Send + Sync + 'static,
{
    let use_case = CurrentUserUseCase::new(state.repo.clone());
    let output = use_case.execute(&claims).await?;

    Ok(Json(MeResponse {
        user: output.user.to_dict(),
        dashboard: output.dashboard,
        permissions: output.permissions,
    }))
}
