//! Domain Layer
//!
//! Contains entities and repository traits.

pub mod entity;
pub mod repository;

// Re-exports
pub use entity::{
    product::{Product, StockPolicy},
    shoe::{Shoe, ShoeCategory, ShoeVariant},
};
pub use repository::ProductRepository;
