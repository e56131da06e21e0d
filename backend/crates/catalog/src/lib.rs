//! Catalog Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Product and shoe entities, repository trait
//! - `application/` - Use cases
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Public shoe listing
//! - Admin-only shoe creation (bearer token with the admin role)
//! - Stock adjustment with an explicit underflow policy

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

mod tests;

// Re-exports for convenience
pub use error::{CatalogError, CatalogResult};
pub use infra::{memory::InMemoryProductRepository, postgres::PgProductRepository};
pub use presentation::router::{catalog_router, catalog_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::presentation::dto::*;
}
