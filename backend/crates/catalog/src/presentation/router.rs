//! Catalog Router

use auth::TokenService;
use auth::middleware::{require_admin, require_bearer};
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{MethodRouter, get, post},
};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repository::ProductRepository;
use crate::infra::postgres::PgProductRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the Catalog router with PostgreSQL repository
pub fn catalog_router(pool: PgPool, tokens: Arc<TokenService>) -> Router {
    catalog_router_generic(Arc::new(PgProductRepository::new(pool)), tokens)
}

/// Create a generic Catalog router for any repository implementation
///
/// Paths are absolute: `/shoes` is served at the root and creation is
/// also reachable under `/api/shoes`.
pub fn catalog_router_generic<P>(repo: Arc<P>, tokens: Arc<TokenService>) -> Router
where
    P: ProductRepository + Send + Sync + 'static,
{
    let state = CatalogAppState { repo };

    Router::new()
        .route(
            "/shoes",
            get(handlers::list_shoes::<P>).merge(admin_create::<P>(tokens.clone())),
        )
        .route("/api/shoes", admin_create::<P>(tokens))
        .with_state(state)
}

/// POST handler gated on a valid token and the admin role
fn admin_create<P>(tokens: Arc<TokenService>) -> MethodRouter<CatalogAppState<P>>
where
    P: ProductRepository + Send + Sync + 'static,
{
    // Layers run bottom-up: the token is checked before the role.
    post(handlers::create_shoe::<P>)
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(tokens, require_bearer))
}
