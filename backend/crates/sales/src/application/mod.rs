//! Application Layer
//!
//! Use cases.

pub mod order_history;
pub mod record_order;
pub mod update_order_status;

// Re-exports
pub use order_history::OrderHistoryUseCase;
pub use record_order::RecordOrderUseCase;
pub use update_order_status::UpdateOrderStatusUseCase;
