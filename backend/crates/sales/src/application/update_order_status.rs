//! Update Order Status Use Case

use std::sync::Arc;

use kernel::id::OrderId;

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::error::{SalesError, SalesResult};

pub struct UpdateOrderStatusUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> UpdateOrderStatusUseCase<O>
where
    O: OrderRepository,
{
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Unknown status names fail before anything is written
    pub async fn execute(&self, order_id: OrderId, status: &str) -> SalesResult<Order> {
        let mut order = self
            .order_repo
            .find_by_id(order_id)
            .await
            .inspect_err(SalesError::log)?
            .ok_or(SalesError::OrderNotFound)?;

        let previous = order.status();
        order.update_status(status)?;
        self.order_repo
            .update_status(&order)
            .await
            .inspect_err(SalesError::log)?;

        tracing::info!(
            order_id = %order_id,
            from = %previous,
            to = %order.status(),
            "Order status changed"
        );

        Ok(order)
    }
}
