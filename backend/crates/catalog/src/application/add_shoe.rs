//! Add Shoe Use Case
//!
//! Validates an admin's shoe submission and stores it.

use std::sync::Arc;

use kernel::id::ProductId;
use rust_decimal::Decimal;

use crate::domain::entity::{
    product::Product,
    shoe::{Shoe, ShoeCategory, ShoeVariant},
};
use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;

/// Add shoe input
#[derive(Debug, Default)]
pub struct AddShoeInput {
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    pub stock: i64,
    pub category: Option<String>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub image: Option<String>,
    pub sport_type: Option<String>,
    pub style: Option<String>,
    pub material: Option<String>,
}

impl AddShoeInput {
    fn into_shoe(self) -> CatalogResult<Shoe> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") => ShoeCategory::default(),
            Some(name) => name.parse::<ShoeCategory>()?,
        };

        let detail = match category {
            ShoeCategory::Athletic => self.sport_type,
            ShoeCategory::Casual => self.style,
            ShoeCategory::Formal => self.material,
        };

        let product = Product::new(self.name, self.brand, self.price, self.stock)?;

        Ok(Shoe::new(product, ShoeVariant::for_category(category, detail))
            .with_size(self.size)
            .with_color(self.color)
            .with_image(self.image))
    }
}

pub struct AddShoeUseCase<P>
where
    P: ProductRepository,
{
    product_repo: Arc<P>,
}

impl<P> AddShoeUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self, input: AddShoeInput) -> CatalogResult<ProductId> {
        let shoe = input.into_shoe()?;
        let shoe_id = self.product_repo.create(&shoe).await?;

        tracing::info!(
            shoe_id = %shoe_id,
            name = %shoe.product().name(),
            category = %shoe.category(),
            "Shoe added"
        );

        Ok(shoe_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(category: Option<&str>) -> AddShoeInput {
        AddShoeInput {
            name: "Air X".into(),
            price: Decimal::new(9999, 2),
            category: category.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_category_defaults_to_casual() {
        let shoe = input(None).into_shoe().unwrap();
        assert_eq!(shoe.variant(), &ShoeVariant::Casual { style: "sneaker".into() });
    }

    #[test]
    fn test_only_matching_detail_is_used() {
        let mut submission = input(Some("athletic"));
        submission.sport_type = Some("basketball".into());
        submission.material = Some("canvas".into());

        let shoe = submission.into_shoe().unwrap();
        assert_eq!(
            shoe.variant(),
            &ShoeVariant::Athletic { sport_type: "basketball".into() }
        );
        assert!(shoe.attributes().material.is_none());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!(input(Some("slipper")).into_shoe().is_err());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        let mut submission = input(None);
        submission.price = Decimal::new(-1, 0);
        assert!(submission.into_shoe().is_err());
    }
}
