//! Repository Traits

use kernel::id::ProductId;

use crate::domain::entity::shoe::Shoe;
use crate::error::CatalogResult;

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Insert a shoe and return the assigned id
    async fn create(&self, shoe: &Shoe) -> CatalogResult<ProductId>;

    /// All shoes in insertion order
    async fn list_shoes(&self) -> CatalogResult<Vec<Shoe>>;

    async fn find_by_id(&self, product_id: ProductId) -> CatalogResult<Option<Shoe>>;

    /// Persist the new stock level
    async fn update_stock(&self, product_id: ProductId, stock: u32) -> CatalogResult<()>;
}
