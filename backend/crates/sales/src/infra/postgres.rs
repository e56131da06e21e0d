//! PostgreSQL Repository Implementation
//!
//! Orders span two tables: `orders` for the header and `order_items` for
//! the lines. The stored total is written for reporting but never read
//! back; it is recomputed from the lines.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, ProductId, UserId};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::entity::order::{Order, OrderItem, OrderStatus};
use crate::domain::repository::OrderRepository;
use crate::error::{SalesError, SalesResult};

/// PostgreSQL-backed order repository
#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn items_for(&self, order_ids: &[i64]) -> SalesResult<HashMap<i64, Vec<OrderItem>>> {
        let rows = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT
                id,
                order_id,
                product_id,
                product_name,
                quantity,
                price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY order_id, id
            "#,
        )
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<OrderItem>> = HashMap::new();
        for row in rows {
            let order_id = row.order_id;
            grouped.entry(order_id).or_default().push(row.into_item()?);
        }
        Ok(grouped)
    }
}

impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: &Order) -> SalesResult<Order> {
        let mut tx = self.pool.begin().await?;

        let order_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO orders (
                user_id,
                total,
                status,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(order.user_id().get())
        .bind(order.total())
        .bind(order.status().as_str())
        .bind(order.created_at())
        .bind(order.updated_at())
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(order.items().len());
        for item in order.items() {
            let item_id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO order_items (
                    order_id,
                    product_id,
                    product_name,
                    quantity,
                    price
                ) VALUES ($1, $2, $3, $4, $5)
                RETURNING id
                "#,
            )
            .bind(order_id)
            .bind(item.product_id().get())
            .bind(item.product_name())
            .bind(i64::from(item.quantity()))
            .bind(item.price())
            .fetch_one(&mut *tx)
            .await?;

            items.push(item.clone().with_id(item_id));
        }

        tx.commit().await?;

        Ok(Order::restore(
            OrderId::new(order_id),
            order.user_id(),
            items,
            order.status(),
            order.created_at(),
            order.updated_at(),
        ))
    }

    async fn find_by_id(&self, order_id: OrderId) -> SalesResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                id,
                user_id,
                status,
                created_at,
                updated_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id.get())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items = self.items_for(&[row.id]).await?;
        let lines = items.remove(&row.id).unwrap_or_default();
        row.into_order(lines).map(Some)
    }

    async fn find_by_user(&self, user_id: UserId) -> SalesResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT
                id,
                user_id,
                status,
                created_at,
                updated_at
            FROM orders
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id.get())
        .fetch_all(&self.pool)
        .await?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mut items = self.items_for(&ids).await?;

        rows.into_iter()
            .map(|row| {
                let lines = items.remove(&row.id).unwrap_or_default();
                row.into_order(lines)
            })
            .collect()
    }

    async fn update_status(&self, order: &Order) -> SalesResult<()> {
        let order_id = order
            .id()
            .ok_or_else(|| SalesError::Internal("Cannot update an unsaved order".into()))?;

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                status = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(order_id.get())
        .bind(order.status().as_str())
        .bind(order.updated_at())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(SalesError::OrderNotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderItem>) -> SalesResult<Order> {
        let status = self.status.parse::<OrderStatus>().map_err(|e| SalesError::CorruptRow {
            id: self.id,
            reason: e.to_string(),
        })?;

        Ok(Order::restore(
            OrderId::new(self.id),
            UserId::new(self.user_id),
            items,
            status,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    order_id: i64,
    product_id: i64,
    product_name: String,
    quantity: i64,
    price: Decimal,
}

impl OrderItemRow {
    fn into_item(self) -> SalesResult<OrderItem> {
        let order_id = self.order_id;
        OrderItem::new(
            ProductId::new(self.product_id),
            self.product_name,
            self.quantity,
            self.price,
        )
        .map(|item| item.with_id(self.id))
        .map_err(|e| SalesError::CorruptRow {
            id: order_id,
            reason: e.to_string(),
        })
    }
}
