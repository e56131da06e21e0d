//! PostgreSQL Repository Implementation
//!
//! Shoe-specific fields live both in their own columns and in the JSON
//! `attributes` column; rows are rebuilt from the columns first.

use chrono::{DateTime, Utc};
use kernel::id::ProductId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::domain::entity::product::Product;
use crate::domain::entity::shoe::{Shoe, ShoeAttributes, ShoeCategory, ShoeVariant};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

/// PostgreSQL-backed product repository
#[derive(Clone)]
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProductRepository for PgProductRepository {
    async fn create(&self, shoe: &Shoe) -> CatalogResult<ProductId> {
        let product = shoe.product();
        let attributes = shoe
            .attributes()
            .encode()
            .map_err(|e| CatalogError::Internal(format!("Failed to encode attributes: {e}")))?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO products (
                name,
                brand,
                price,
                size,
                stock,
                color,
                category,
                attributes,
                image,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(product.name())
        .bind(product.brand())
        .bind(product.price())
        .bind(shoe.size())
        .bind(i64::from(product.stock()))
        .bind(shoe.color())
        .bind(shoe.category().as_str())
        .bind(attributes)
        .bind(shoe.image())
        .bind(product.created_at())
        .fetch_one(&self.pool)
        .await?;

        Ok(ProductId::new(id))
    }

    async fn list_shoes(&self) -> CatalogResult<Vec<Shoe>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id,
                name,
                brand,
                price,
                size,
                stock,
                color,
                category,
                attributes,
                image,
                created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ProductRow::into_shoe).collect()
    }

    async fn find_by_id(&self, product_id: ProductId) -> CatalogResult<Option<Shoe>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT
                id,
                name,
                brand,
                price,
                size,
                stock,
                color,
                category,
                attributes,
                image,
                created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductRow::into_shoe).transpose()
    }

    async fn update_stock(&self, product_id: ProductId, stock: u32) -> CatalogResult<()> {
        let result = sqlx::query("UPDATE products SET stock = $2 WHERE id = $1")
            .bind(product_id.get())
            .bind(i64::from(stock))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound);
        }
        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    brand: String,
    price: Decimal,
    size: Option<String>,
    stock: i64,
    color: Option<String>,
    category: Option<String>,
    attributes: Option<String>,
    image: Option<String>,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_shoe(self) -> CatalogResult<Shoe> {
        let id = self.id;
        let corrupt = |reason: String| CatalogError::CorruptRow { id, reason };

        let attributes = ShoeAttributes::decode(self.attributes.as_deref().unwrap_or_default())
            .map_err(|e| corrupt(e.to_string()))?;

        let category = match self.category.as_deref().or(attributes.category.as_deref()) {
            Some(name) if !name.trim().is_empty() => name
                .parse::<ShoeCategory>()
                .map_err(|e| corrupt(e.to_string()))?,
            _ => ShoeCategory::default(),
        };

        let detail = match category {
            ShoeCategory::Athletic => attributes.sport_type,
            ShoeCategory::Casual => attributes.style,
            ShoeCategory::Formal => attributes.material,
        };

        let product = Product::new(self.name, self.brand, self.price, self.stock)
            .map_err(|e| corrupt(e.to_string()))?
            .with_id(ProductId::new(self.id))
            .with_created_at(self.created_at);

        Ok(Shoe::new(product, ShoeVariant::for_category(category, detail))
            .with_size(self.size.or(attributes.size))
            .with_color(self.color.or(attributes.color))
            .with_image(self.image.or(attributes.image)))
    }
}
