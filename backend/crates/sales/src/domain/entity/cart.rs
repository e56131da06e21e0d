//! Cart Entity
//!
//! A user's basket. Items are keyed by product id and keep the order in
//! which they were first added; name and price are snapshots taken at
//! that moment.

use chrono::{DateTime, Utc};
use kernel::{
    error::validation::ValidationError,
    id::{CartId, ProductId, UserId},
    money::{checked_price, checked_sum, line_total},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn checked_quantity(quantity: i64) -> Result<u32, ValidationError> {
    if quantity < 0 {
        return Err(ValidationError::new("quantity", "Quantity cannot be negative"));
    }
    u32::try_from(quantity).map_err(|_| ValidationError::new("quantity", "Quantity is too large"))
}

// ============================================================================
// Cart item
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    product_id: ProductId,
    product_name: String,
    price: Decimal,
    quantity: u32,
}

impl CartItem {
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        price: Decimal,
        quantity: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            product_id,
            product_name: product_name.into(),
            price: checked_price(price)?,
            quantity: checked_quantity(quantity)?,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Zero is allowed; only negatives are rejected
    pub fn set_quantity(&mut self, quantity: i64) -> Result<(), ValidationError> {
        self.quantity = checked_quantity(quantity)?;
        Ok(())
    }

    /// A bounded price times a `u32` quantity always fits in a `Decimal`
    pub fn subtotal(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }

    pub fn to_dict(&self) -> CartItemDict {
        CartItemDict {
            product_id: self.product_id.get(),
            product_name: self.product_name.clone(),
            price: self.price,
            quantity: Some(i64::from(self.quantity)),
            subtotal: Some(self.subtotal()),
        }
    }
}

// ============================================================================
// Cart
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    id: Option<CartId>,
    user_id: UserId,
    items: Vec<CartItem>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            user_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: CartId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<CartId> {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items.iter().position(|item| item.product_id == product_id)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Total if the line at `index` (or a new line) were `line`
    fn total_with(&self, index: Option<usize>, line: &CartItem) -> Result<Decimal, ValidationError> {
        let others = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != index)
            .map(|(_, item)| item.subtotal());
        checked_sum(others.chain([line_total(line.price, line.quantity)?]))
    }

    /// Add `quantity` of a product
    ///
    /// An existing line accumulates and keeps its original name and price
    /// snapshot. A line that would push the total out of range is rejected
    /// and the cart is left unchanged.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        product_name: impl Into<String>,
        price: Decimal,
        quantity: i64,
    ) -> Result<&CartItem, ValidationError> {
        let index = match self.position(product_id) {
            Some(index) => {
                let mut line = self.items[index].clone();
                line.set_quantity(i64::from(line.quantity).saturating_add(quantity))?;
                self.total_with(Some(index), &line)?;
                self.items[index] = line;
                index
            }
            None => {
                let line = CartItem::new(product_id, product_name, price, quantity)?;
                self.total_with(None, &line)?;
                self.items.push(line);
                self.items.len() - 1
            }
        };
        self.touch();
        Ok(&self.items[index])
    }

    /// Returns whether the product was in the cart
    pub fn remove_item(&mut self, product_id: ProductId) -> bool {
        match self.position(product_id) {
            Some(index) => {
                self.items.remove(index);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// A quantity of zero or less removes the line
    ///
    /// Returns whether the product was in the cart. A quantity that would
    /// push the total out of range leaves the line as it was.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        // Past u32::MAX the line saturates.
        let mut line = self.items[index].clone();
        line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if self.total_with(Some(index), &line).is_ok() {
            self.items[index] = line;
            self.touch();
        }
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    /// Every mutation keeps this sum in range
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc.saturating_add(item.subtotal()))
    }

    /// Sum of quantities
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_item(&self, product_id: ProductId) -> bool {
        self.position(product_id).is_some()
    }

    pub fn get_item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }

    pub fn to_dict(&self) -> CartDict {
        CartDict {
            id: self.id.map(|id| id.get()),
            user_id: self.user_id.get(),
            items: self.items.iter().map(CartItem::to_dict).collect(),
            total: Some(self.total()),
            item_count: Some(self.item_count()),
            created_at: Some(self.created_at),
            updated_at: Some(self.updated_at),
        }
    }

    /// `total` and `item_count` in the input are ignored
    pub fn from_dict(dict: CartDict) -> Result<Self, ValidationError> {
        let mut cart = Cart::new(UserId::new(dict.user_id));
        cart.id = dict.id.map(CartId::new);

        for item in dict.items {
            cart.add_item(
                ProductId::new(item.product_id),
                item.product_name,
                item.price,
                item.quantity.unwrap_or(1),
            )?;
        }

        if let Some(created_at) = dict.created_at {
            cart.created_at = created_at;
        }
        if let Some(updated_at) = dict.updated_at {
            cart.updated_at = updated_at;
        }
        Ok(cart)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItemDict {
    pub product_id: i64,
    #[serde(default)]
    pub product_name: String,
    pub price: Decimal,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartDict {
    #[serde(default)]
    pub id: Option<i64>,
    pub user_id: i64,
    #[serde(default)]
    pub items: Vec<CartItemDict>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub item_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
