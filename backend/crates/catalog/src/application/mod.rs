//! Application Layer
//!
//! Use cases.

pub mod add_shoe;
pub mod adjust_stock;
pub mod list_shoes;

// Re-exports
pub use add_shoe::{AddShoeInput, AddShoeUseCase};
pub use adjust_stock::AdjustStockUseCase;
pub use list_shoes::ListShoesUseCase;
