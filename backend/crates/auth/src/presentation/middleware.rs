//! Auth Middleware
//!
//! `require_bearer` verifies the token and stores its [`Claims`] in the
//! request extensions; `require_admin` must run after it.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::{Request, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;

use crate::application::{authorize::authorize, token::TokenService};
use crate::domain::entity::claims::Claims;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;

/// Middleware that requires a valid bearer token
pub async fn require_bearer(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let claims = tokens.verify(raw)?;

    tracing::debug!(user_id = %claims.user_id, role = %claims.role, "Bearer token accepted");

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Middleware that requires the admin role
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<Response, AuthError> {
    let claims = req
        .extensions()
        .get::<Claims>()
        .ok_or(AuthError::MissingToken)?;

    authorize(claims, UserRole::Admin)?;

    Ok(next.run(req).await)
}

/// Verified claims of the caller
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(CurrentUser)
            .ok_or(AuthError::MissingToken)
    }
}
