//! Sales Backend Module
//!
//! Carts and orders. There is no HTTP surface; other modules and
//! background jobs drive the use cases directly.
//!
//! - `domain/` - Cart and order entities, repository trait
//! - `application/` - Use cases
//! - `infra/` - Database and in-memory implementations

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;


// Re-exports for convenience
pub use domain::entity::{
    cart::{Cart, CartItem},
    order::{Order, OrderItem, OrderStatus},
};
pub use error::{SalesError, SalesResult};
pub use infra::{memory::InMemoryOrderRepository, postgres::PgOrderRepository};
