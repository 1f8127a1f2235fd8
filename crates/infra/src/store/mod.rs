//! Product persistence.
//!
//! Every backend acquires its storage session (a pooled connection, a
//! transaction, or a lock guard) inside the call and releases it on drop,
//! so no session outlives a single operation regardless of how it exits.

pub mod in_memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use storeroom_core::DomainError;
use storeroom_products::{NewProduct, Product, ProductFields, ProductId};

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The backend failed (connection loss, constraint violation, ...).
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found() -> Self {
        Self::Domain(DomainError::not_found())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Domain(DomainError::NotFound))
    }
}

/// Storage contract for products.
///
/// `list` and `list_by_category` make no ordering promise to callers; the
/// bundled backends happen to return ascending ids.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a product; the store assigns the id.
    async fn create(&self, new: NewProduct) -> Result<Product, StoreError>;

    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    /// Products whose category equals `category` exactly. Unknown categories
    /// yield an empty list.
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError>;

    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Overwrite all mutable fields of an existing product.
    ///
    /// Returns `StoreError::Domain(DomainError::NotFound)` and writes nothing
    /// when `id` is absent.
    async fn update(&self, id: ProductId, fields: ProductFields) -> Result<Product, StoreError>;

    /// Remove an existing product; not-found when `id` is absent.
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}
