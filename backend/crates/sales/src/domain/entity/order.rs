//! Order Entity
//!
//! A placed order. Items keep insertion order and the total is always
//! derived from them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use kernel::{
    error::validation::ValidationError,
    id::{OrderId, ProductId, UserId},
    money::{checked_price, checked_sum},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ValidationError::new(
                    "status",
                    "Status must be one of pending, processing, completed, cancelled",
                )
            })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Order item
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    id: Option<i64>,
    product_id: ProductId,
    product_name: String,
    quantity: u32,
    price: Decimal,
}

impl OrderItem {
    /// Quantity must be at least 1 and price a valid unit price
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        price: Decimal,
    ) -> Result<Self, ValidationError> {
        if quantity < 1 {
            return Err(ValidationError::new("quantity", "Quantity must be at least 1"));
        }
        let quantity = u32::try_from(quantity)
            .map_err(|_| ValidationError::new("quantity", "Quantity is too large"))?;

        Ok(Self {
            id: None,
            product_id,
            product_name: product_name.into(),
            quantity,
            price: checked_price(price)?,
        })
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    /// A bounded price times a `u32` quantity always fits in a `Decimal`
    pub fn subtotal(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    pub fn to_dict(&self) -> OrderItemDict {
        OrderItemDict {
            id: self.id,
            product_id: self.product_id.get(),
            product_name: self.product_name.clone(),
            quantity: i64::from(self.quantity),
            price: self.price,
            subtotal: Some(self.subtotal()),
        }
    }

    pub fn from_dict(dict: OrderItemDict) -> Result<Self, ValidationError> {
        let item = Self::new(
            ProductId::new(dict.product_id),
            dict.product_name,
            dict.quantity,
            dict.price,
        )?;
        Ok(match dict.id {
            Some(id) => item.with_id(id),
            None => item,
        })
    }
}

// ============================================================================
// Order
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: Option<OrderId>,
    user_id: UserId,
    items: Vec<OrderItem>,
    total: Decimal,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Empty pending order
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            user_id,
            items: Vec::new(),
            total: Decimal::ZERO,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a stored order; the total is recomputed
    pub(crate) fn restore(
        id: OrderId,
        user_id: UserId,
        items: Vec<OrderItem>,
        status: OrderStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        // Stored lines were range-checked when the order was built.
        let total = items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.subtotal()));
        Self {
            id: Some(id),
            user_id,
            items,
            total,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn with_id(mut self, id: OrderId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<OrderId> {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Rejects a line that would push the total out of range
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), ValidationError> {
        self.total = checked_sum([self.total, item.subtotal()])?;
        self.items.push(item);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Drops every line for the product; returns whether any was removed
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        let removed = self.items.len() != before;
        // A subset of an in-range sum stays in range.
        self.total = self
            .items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.subtotal()));
        self.updated_at = Utc::now();
        removed
    }

    /// Sum of quantities
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Move to any recognised status; unknown names leave it unchanged
    pub fn update_status(&mut self, status: &str) -> Result<(), ValidationError> {
        self.status = status.parse()?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn to_dict(&self) -> OrderDict {
        OrderDict {
            id: self.id.map(|id| id.get()),
            user_id: self.user_id.get(),
            items: self.items.iter().map(OrderItem::to_dict).collect(),
            total: Some(self.total),
            status: Some(self.status.to_string()),
            item_count: Some(self.item_count()),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    /// Missing status means pending; a stored `total` is never trusted
    pub fn from_dict(dict: OrderDict) -> Result<Self, ValidationError> {
        let status = match dict.status.as_deref() {
            Some(name) => name.parse()?,
            None => OrderStatus::default(),
        };
        let items = dict
            .items
            .into_iter()
            .map(OrderItem::from_dict)
            .collect::<Result<Vec<_>, _>>()?;

        let mut order = Order::new(UserId::new(dict.user_id));
        order.id = dict.id.map(OrderId::new);
        order.status = status;
        order.total = checked_sum(items.iter().map(OrderItem::subtotal))?;
        order.items = items;
        if let Some(created_at) = dict.created_at {
            order.created_at = created_at;
        }
        if let Some(updated_at) = dict.updated_at {
            order.updated_at = updated_at;
        }
        Ok(order)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemDict {
    #[serde(default)]
    pub id: Option<i64>,
    pub product_id: i64,
    #[serde(default)]
    pub product_name: String,
    pub quantity: i64,
    pub price: Decimal,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDict {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: i64,
    #[serde(default)]
    pub items: Vec<OrderItemDict>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub item_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
