//! List Shoes Use Case

use std::sync::Arc;

use crate::domain::entity::shoe::Shoe;
use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;

pub struct ListShoesUseCase<P>
where
    P: ProductRepository,
{
    product_repo: Arc<P>,
}

impl<P> ListShoesUseCase<P>
where
    P: ProductRepository,
{
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self) -> CatalogResult<Vec<Shoe>> {
        self.product_repo.list_shoes().await
    }
}
