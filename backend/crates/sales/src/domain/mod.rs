//! Domain Layer
//!
//! Contains entities and repository traits.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::{
    cart::{Cart, CartItem},
    order::{Order, OrderItem, OrderStatus},
};
pub use repository::OrderRepository;
