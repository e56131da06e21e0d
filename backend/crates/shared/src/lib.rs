//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the store's vocabulary:
//! - Common error types and result aliases
//! - Field-level validation errors raised by entity invariants
//! - Store-assigned ID types shared by users, products, carts and orders
//! - Price bounds and checked money arithmetic
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod kind;
    #[cfg(feature = "axum")]
    pub mod response;
    pub mod validation;
}
pub mod id;
pub mod money;
