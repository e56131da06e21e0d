//! Repository Traits

use kernel::id::{OrderId, UserId};

use crate::domain::entity::order::Order;
use crate::error::SalesResult;

/// Order repository trait
#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// Store the order header and its items atomically; returns the order
    /// with store-assigned ids
    async fn create(&self, order: &Order) -> SalesResult<Order>;

    async fn find_by_id(&self, order_id: OrderId) -> SalesResult<Option<Order>>;

    /// Orders of a user, oldest first
    async fn find_by_user(&self, user_id: UserId) -> SalesResult<Vec<Order>>;

    /// Persist the order's status and `updated_at`
    async fn update_status(&self, order: &Order) -> SalesResult<()>;
}
