//! Record Order Use Case
//!
//! Persists an order assembled by the caller.

use std::sync::Arc;

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::error::{SalesError, SalesResult};

pub struct RecordOrderUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> RecordOrderUseCase<O>
where
    O: OrderRepository,
{
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    /// Returns the stored order with its assigned ids
    pub async fn execute(&self, order: &Order) -> SalesResult<Order> {
        let stored = self
            .order_repo
            .create(order)
            .await
            .inspect_err(SalesError::log)?;

        if let Some(order_id) = stored.id() {
            tracing::info!(
                order_id = %order_id,
                user_id = %stored.user_id(),
                total = %stored.total(),
                items = stored.item_count(),
                "Order recorded"
            );
        }

        Ok(stored)
    }
}
