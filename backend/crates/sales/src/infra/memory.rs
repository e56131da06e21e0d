//! In-Memory Repository Implementation
//!
//! Same contract as the Postgres repository, including per-line ids.
//! Used by tests and local experiments.

use std::collections::BTreeMap;
use std::sync::Mutex;

use kernel::id::{OrderId, UserId};

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::error::{SalesError, SalesResult};

#[derive(Default)]
struct Table {
    next_order_id: i64,
    next_item_id: i64,
    rows: BTreeMap<OrderId, Order>,
}

#[derive(Default)]
pub struct InMemoryOrderRepository {
    table: Mutex<Table>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored orders
    pub fn len(&self) -> usize {
        self.lock().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> SalesResult<std::sync::MutexGuard<'_, Table>> {
        self.table
            .lock()
            .map_err(|_| SalesError::Internal("Order table lock poisoned".into()))
    }
}

impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> SalesResult<Order> {
        let mut table = self.lock()?;

        table.next_order_id += 1;
        let order_id = OrderId::new(table.next_order_id);

        let mut items = Vec::with_capacity(order.items().len());
        for item in order.items() {
            table.next_item_id += 1;
            items.push(item.clone().with_id(table.next_item_id));
        }

        let stored = Order::restore(
            order_id,
            order.user_id(),
            items,
            order.status(),
            order.created_at(),
            order.updated_at(),
        );
        table.rows.insert(order_id, stored.clone());

        Ok(stored)
    }

    async fn find_by_id(&self, order_id: OrderId) -> SalesResult<Option<Order>> {
        Ok(self.lock()?.rows.get(&order_id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> SalesResult<Vec<Order>> {
        Ok(self
            .lock()?
            .rows
            .values()
            .filter(|order| order.user_id() == user_id)
            .cloned()
            .collect())
    }

    async fn update_status(&self, order: &Order) -> SalesResult<()> {
        let order_id = order
            .id()
            .ok_or_else(|| SalesError::Internal("Cannot update an unsaved order".into()))?;

        let mut table = self.lock()?;
        let stored = table
            .rows
            .get_mut(&order_id)
            .ok_or(SalesError::OrderNotFound)?;
        *stored = Order::restore(
            order_id,
            stored.user_id(),
            stored.items().to_vec(),
            order.status(),
            stored.created_at(),
            order.updated_at(),
        );
        Ok(())
    }
}
