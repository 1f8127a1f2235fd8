use std::sync::Arc;

use storeroom_infra::config::DatabaseConfig;
use storeroom_infra::{InMemoryProductStore, PostgresProductStore, ProductStore, StoreError};

/// The product store backing the API.
#[derive(Clone)]
pub enum AppServices {
    InMemory { store: Arc<InMemoryProductStore> },
    Persistent { store: Arc<PostgresProductStore> },
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        AppServices::InMemory {
            store: Arc::new(InMemoryProductStore::new()),
        }
    }

    pub fn persistent(store: PostgresProductStore) -> Self {
        AppServices::Persistent {
            store: Arc::new(store),
        }
    }

    pub fn products(&self) -> &dyn ProductStore {
        match self {
            AppServices::InMemory { store } => store.as_ref(),
            AppServices::Persistent { store } => store.as_ref(),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            AppServices::InMemory { .. } => "in_memory",
            AppServices::Persistent { .. } => "postgres",
        }
    }
}

/// Select the store: Postgres when a database URL is configured (creating
/// the table on first start), in-memory otherwise.
pub async fn build_services(config: &DatabaseConfig) -> Result<AppServices, StoreError> {
    match config.url.as_deref() {
        Some(url) => {
            let store = PostgresProductStore::connect(url, config.max_connections).await?;
            store.ensure_schema().await?;
            Ok(AppServices::persistent(store))
        }
        None => {
            tracing::warn!("no database url configured; products are kept in memory only");
            Ok(AppServices::in_memory())
        }
    }
}
