use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use storeroom_products::{NewProduct, Product, ProductFields, ProductId};

use super::{ProductStore, StoreError};

#[derive(Debug)]
struct Rows {
    next_id: i64,
    by_id: BTreeMap<ProductId, Product>,
}

/// In-memory product store for tests/dev.
///
/// Ids start at 1 and are never reused, even after a delete.
#[derive(Debug)]
pub struct InMemoryProductStore {
    inner: RwLock<Rows>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows {
                next_id: 1,
                by_id: BTreeMap::new(),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Rows>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Rows>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("in-memory store lock poisoned".to_string()))
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn create(&self, new: NewProduct) -> Result<Product, StoreError> {
        let mut rows = self.write()?;
        let id = ProductId::from_i64(rows.next_id);
        rows.next_id += 1;

        let product = Product::new(id, new);
        rows.by_id.insert(id, product.clone());
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.read()?.by_id.values().cloned().collect())
    }

    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError> {
        Ok(self
            .read()?
            .by_id
            .values()
            .filter(|p| p.in_category(category))
            .cloned()
            .collect())
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        Ok(self.read()?.by_id.get(&id).cloned())
    }

    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Product, StoreError> {
        let mut rows = self.write()?;
        let product = rows.by_id.get_mut(&id).ok_or_else(StoreError::not_found)?;
        product.overwrite(fields);
        Ok(product.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut rows = self.write()?;
        rows.by_id
            .remove(&id)
            .map(|_| ())
            .ok_or_else(StoreError::not_found)
    }
}
