//! Product Entity
//!
//! Common sellable-item state. Price and stock can never go negative:
//! every mutation validates before writing.

use chrono::{DateTime, Utc};
use kernel::{error::validation::ValidationError, id::ProductId, money::checked_price};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What `update_stock` does when the result would be negative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockPolicy {
    /// Fail and leave stock unchanged
    Reject,
    /// Floor the result at zero
    Clamp,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    id: Option<ProductId>,
    name: String,
    brand: String,
    price: Decimal,
    stock: u32,
    created_at: DateTime<Utc>,
}

fn checked_stock(stock: i64) -> Result<u32, ValidationError> {
    if stock < 0 {
        return Err(ValidationError::new("stock", "Stock cannot be negative"));
    }
    u32::try_from(stock).map_err(|_| ValidationError::new("stock", "Stock is too large"))
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        price: Decimal,
        stock: i64,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::new("name", "Name cannot be empty"));
        }

        Ok(Self {
            id: None,
            name,
            brand: brand.into().trim().to_string(),
            price: checked_price(price)?,
            stock: checked_stock(stock)?,
            created_at: Utc::now(),
        })
    }

    /// Record the id assigned by the store
    pub fn with_id(mut self, id: ProductId) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> Option<ProductId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn set_price(&mut self, price: Decimal) -> Result<(), ValidationError> {
        self.price = checked_price(price)?;
        Ok(())
    }

    pub fn set_stock(&mut self, stock: i64) -> Result<(), ValidationError> {
        self.stock = checked_stock(stock)?;
        Ok(())
    }

    /// Add `delta` to stock and return the new level
    pub fn update_stock(&mut self, delta: i64, policy: StockPolicy) -> Result<u32, ValidationError> {
        let target = i64::from(self.stock).saturating_add(delta);
        let target = match policy {
            StockPolicy::Reject => target,
            StockPolicy::Clamp => target.max(0),
        };
        self.set_stock(target)?;
        Ok(self.stock)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    pub fn to_dict(&self) -> ProductDict {
        ProductDict {
            id: self.id.map(|id| id.get()),
            name: self.name.clone(),
            brand: self.brand.clone(),
            price: self.price,
            stock: Some(i64::from(self.stock)),
            created_at: Some(self.created_at),
        }
    }

    /// Missing `stock` means 0, missing `created_at` means now
    pub fn from_dict(dict: ProductDict) -> Result<Self, ValidationError> {
        let mut product = Self::new(dict.name, dict.brand, dict.price, dict.stock.unwrap_or(0))?;
        product.id = dict.id.map(ProductId::new);
        if let Some(created_at) = dict.created_at {
            product.created_at = created_at;
        }
        Ok(product)
    }
}

/// Serialized product; `price` is a JSON number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDict {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub brand: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product::new("Air X", "Nike", Decimal::new(9999, 2), 10).unwrap()
    }

    #[test]
    fn test_new_validates() {
        assert_eq!(
            Product::new("  ", "Nike", Decimal::ONE, 1).unwrap_err().field(),
            "name"
        );
        assert_eq!(
            Product::new("A", "Nike", Decimal::new(-1, 2), 1).unwrap_err().field(),
            "price"
        );
        assert_eq!(
            Product::new("A", "Nike", Decimal::ONE, -1).unwrap_err().field(),
            "stock"
        );
        assert!(Product::new("A", "", Decimal::ZERO, 0).is_ok());
    }

    #[test]
    fn test_setters_reject_negative_values() {
        let mut p = product();
        assert!(p.set_price(Decimal::new(-5, 0)).is_err());
        assert_eq!(p.price(), Decimal::new(9999, 2));

        assert!(p.set_stock(-3).is_err());
        assert_eq!(p.stock(), 10);

        p.set_stock(0).unwrap();
        assert!(!p.in_stock());
    }

    #[test]
    fn test_price_must_fit_storage() {
        let err = Product::new("A", "Nike", Decimal::new(19999, 3), 1).unwrap_err();
        assert_eq!(err.field(), "price");

        let err = Product::new("A", "Nike", Decimal::from(10_000_000_000_i64), 1).unwrap_err();
        assert_eq!(err.field(), "price");

        let mut p = product();
        assert!(p.set_price(Decimal::new(19999, 3)).is_err());
        assert_eq!(p.price(), Decimal::new(9999, 2));
        p.set_price(Decimal::new(19990, 3)).unwrap();
        assert_eq!(p.price(), Decimal::new(1999, 2));
    }

    #[test]
    fn test_update_stock_reject() {
        let mut p = product();
        assert_eq!(p.update_stock(5, StockPolicy::Reject).unwrap(), 15);
        assert!(p.update_stock(-20, StockPolicy::Reject).is_err());
        assert_eq!(p.stock(), 15);
    }

    #[test]
    fn test_update_stock_clamp() {
        let mut p = product();
        assert_eq!(p.update_stock(-20, StockPolicy::Clamp).unwrap(), 0);
        assert!(!p.in_stock());
    }

    #[test]
    fn test_dict_roundtrip() {
        let p = product().with_id(ProductId::new(4));
        let restored = Product::from_dict(p.to_dict()).unwrap();
        assert_eq!(restored, p);
    }

    #[test]
    fn test_dict_json_shape() {
        let json = serde_json::to_value(product().to_dict()).unwrap();
        assert_eq!(json["price"], serde_json::json!(99.99));
        assert_eq!(json["stock"], 10);
        assert!(json["created_at"].is_string());
    }

    #[test]
    fn test_from_dict_defaults() {
        let dict: ProductDict =
            serde_json::from_str(r#"{"name":"Loafer","brand":"Clarks","price":50}"#).unwrap();
        let before = Utc::now();
        let p = Product::from_dict(dict).unwrap();

        assert_eq!(p.stock(), 0);
        assert!(p.created_at() >= before);
        assert_eq!(p.id(), None);
    }
}
