//! In-Memory Repository Implementation
//!
//! Same contract as the Postgres repository. Used by tests and local
//! experiments.

use std::collections::BTreeMap;
use std::sync::Mutex;

use kernel::id::ProductId;

use crate::domain::entity::shoe::Shoe;
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

#[derive(Default)]
struct Table {
    next_id: i64,
    rows: BTreeMap<ProductId, Shoe>,
}

#[derive(Default)]
pub struct InMemoryProductRepository {
    table: Mutex<Table>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products
    pub fn len(&self) -> usize {
        self.lock().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> CatalogResult<std::sync::MutexGuard<'_, Table>> {
        self.table
            .lock()
            .map_err(|_| CatalogError::Internal("Product table lock poisoned".into()))
    }
}

impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, shoe: &Shoe) -> CatalogResult<ProductId> {
        let mut table = self.lock()?;

        table.next_id += 1;
        let id = ProductId::new(table.next_id);

        let mut stored = shoe.clone();
        let product = stored.product().clone().with_id(id);
        *stored.product_mut() = product;
        table.rows.insert(id, stored);

        Ok(id)
    }

    async fn list_shoes(&self) -> CatalogResult<Vec<Shoe>> {
        Ok(self.lock()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, product_id: ProductId) -> CatalogResult<Option<Shoe>> {
        Ok(self.lock()?.rows.get(&product_id).cloned())
    }

    async fn update_stock(&self, product_id: ProductId, stock: u32) -> CatalogResult<()> {
        let mut table = self.lock()?;
        let shoe = table
            .rows
            .get_mut(&product_id)
            .ok_or(CatalogError::NotFound)?;
        shoe.product_mut().set_stock(i64::from(stock))?;
        Ok(())
    }
}
