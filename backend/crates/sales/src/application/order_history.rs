//! Order History Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::error::{SalesError, SalesResult};

pub struct OrderHistoryUseCase<O>
where
    O: OrderRepository,
{
    order_repo: Arc<O>,
}

impl<O> OrderHistoryUseCase<O>
where
    O: OrderRepository,
{
    pub fn new(order_repo: Arc<O>) -> Self {
        Self { order_repo }
    }

    pub async fn execute(&self, user_id: UserId) -> SalesResult<Vec<Order>> {
        self.order_repo
            .find_by_user(user_id)
            .await
            .inspect_err(SalesError::log)
    }
}
