//! API DTOs (Data Transfer Objects)
//!
//! The admin form posts every field as a string, so numeric fields accept
//! either a JSON number or numeric text.

use std::str::FromStr;

use kernel::error::validation::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::AddShoeInput;
use crate::error::{CatalogError, CatalogResult};

/// A JSON number or a string holding one
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    fn text(&self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.trim().to_string(),
        }
    }

    pub fn to_decimal(&self, field: &'static str) -> Result<Decimal, ValidationError> {
        let text = self.text();
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map_err(|_| ValidationError::new(field, format!("Invalid number: {text}")))
    }

    pub fn to_integer(&self, field: &'static str) -> Result<i64, ValidationError> {
        let value = self.to_decimal(field)?;
        if !value.fract().is_zero() {
            return Err(ValidationError::new(field, "Expected a whole number"));
        }
        i64::try_from(value).map_err(|_| ValidationError::new(field, "Number is out of range"))
    }

    /// Textual form, for fields stored as strings
    pub fn into_string(self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
        }
    }
}

// ============================================================================
// Create shoe
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateShoeRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<Scalar>,
    pub stock: Option<Scalar>,
    pub size: Option<Scalar>,
    pub color: Option<String>,
    pub category: Option<String>,
    /// Older clients send the category as `type`
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub image: Option<String>,
    pub sport_type: Option<String>,
    pub style: Option<String>,
    pub material: Option<String>,
}

impl CreateShoeRequest {
    pub fn into_input(self) -> CatalogResult<AddShoeInput> {
        let name = self.name.filter(|n| !n.trim().is_empty());
        let (name, price) = match (name, self.price) {
            (Some(name), Some(price)) => (name, price),
            _ => return Err(CatalogError::MissingFields("Name and price are required")),
        };

        let stock = match self.stock {
            Some(Scalar::Text(ref s)) if s.trim().is_empty() => 0,
            Some(stock) => stock.to_integer("stock")?,
            None => 0,
        };

        Ok(AddShoeInput {
            name,
            brand: self.brand.unwrap_or_default(),
            price: price.to_decimal("price")?,
            stock,
            category: self.category.or(self.kind),
            size: self.size.map(Scalar::into_string),
            color: self.color,
            image: self.image,
            sport_type: self.sport_type,
            style: self.style,
            material: self.material,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateShoeResponse {
    pub message: &'static str,
    pub shoe_id: i64,
}
