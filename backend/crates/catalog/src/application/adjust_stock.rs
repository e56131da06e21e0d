//! Adjust Stock Use Case
//!
//! Applies a stock delta under a caller-chosen policy and persists it.

use std::sync::Arc;

use kernel::id::ProductId;

use crate::domain::entity::product::StockPolicy;
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct AdjustStockUseCase<P>
where
    P: ProductRepository,
{
    product_repo: Arc<P>,
}

impl<P> AdjustStockUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    /// Returns the new stock level
    pub async fn execute(
        &self,
        product_id: ProductId,
        delta: i64,
        policy: StockPolicy,
    ) -> CatalogResult<u32> {
        let mut shoe = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or(CatalogError::NotFound)?;

        let stock = shoe.product_mut().update_stock(delta, policy)?;
        self.product_repo.update_stock(product_id, stock).await?;

        tracing::info!(product_id = %product_id, delta, stock, "Stock adjusted");

        Ok(stock)
    }
}
