//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::{config::AuthConfig, token::TokenService};
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgUserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer;

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgUserRepository, config: AuthConfig) -> Router {
    let tokens = Arc::new(TokenService::new(&config));
    auth_router_generic(Arc::new(repo), Arc::new(config), tokens)
}

/// Create a generic Auth router for any repository implementation
///
/// Routes are relative; the caller nests them under `/api`.
pub fn auth_router_generic<U>(
    repo: Arc<U>,
    config: Arc<AuthConfig>,
    tokens: Arc<TokenService>,
) -> Router
where
    U: UserRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo,
        config,
        tokens: tokens.clone(),
    };

    Router::new()
        .route(
            "/me",
            get(handlers::me::<U>).route_layer(from_fn_with_state(tokens, require_bearer)),
        )
        .route("/register", post(handlers::register::<U>))
        .route("/login", post(handlers::login::<U>))
        .with_state(state)
}
