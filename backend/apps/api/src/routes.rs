//! Router Assembly
//!
//! Auth lives under `/api`; the catalog brings its own absolute paths.

use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::{AuthConfig, TokenService, auth_router_generic};
use axum::Router;
use catalog::catalog_router_generic;
use catalog::domain::repository::ProductRepository;

/// Build the API router over any repository implementations
///
/// Both modules share one token service so tokens issued at login are
/// accepted by the catalog.
pub fn build_app<U, P>(users: Arc<U>, products: Arc<P>, config: AuthConfig) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    P: ProductRepository + Send + Sync + 'static,
{
    let tokens = Arc::new(TokenService::new(&config));

    Router::new()
        .nest("/api", auth_router_generic(users, Arc::new(config), tokens.clone()))
        .merge(catalog_router_generic(products, tokens))
}
