//! Postgres-backed product store.
//!
//! ## Sessions
//!
//! Single-statement operations acquire a pooled connection for the duration
//! of the call. Update and delete run their fetch-then-write inside one
//! transaction; any early return drops the transaction, which rolls it back
//! and hands the connection back to the pool.
//!
//! ## Error Mapping
//!
//! | SQLx Error | StoreError |
//! |------------|------------|
//! | Database (any code) | `Backend` (message includes the SQLSTATE) |
//! | PoolClosed / PoolTimedOut | `Backend` |
//! | Other (I/O, TLS, decode) | `Backend` |
//!
//! A missing row is never an SQLx error here; queries use `fetch_optional`
//! and report `NotFound` explicitly.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use storeroom_products::{NewProduct, Product, ProductFields, ProductId};

use super::{ProductStore, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id       BIGSERIAL PRIMARY KEY,
    name     TEXT NOT NULL,
    category TEXT NOT NULL,
    size     DOUBLE PRECISION NOT NULL,
    unit     TEXT NOT NULL
)
"#;

const CATEGORY_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS products_category_idx ON products (category)";

/// Postgres-backed product store.
///
/// `PgPool` is internally reference-counted, so cloning the store is cheap
/// and every clone shares the same pool.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool of at most `max_connections` to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Create the `products` table if it does not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;

        sqlx::query(SCHEMA)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        sqlx::query(CATEGORY_INDEX)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self, new), fields(category = %new.category), err)]
    async fn create(&self, new: NewProduct) -> Result<Product, StoreError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error("create", e))?;

        let row = sqlx::query(
            r#"
            INSERT INTO products (name, category, size, unit)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, category, size, unit
            "#,
        )
        .bind(&new.name)
        .bind(&new.category)
        .bind(new.size)
        .bind(&new.unit)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("create", e))?;

        product_from_row(&row).map_err(|e| map_sqlx_error("create", e))
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error("list", e))?;

        let rows = sqlx::query(
            r#"
            SELECT id, name, category, size, unit
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        rows.iter()
            .map(product_from_row)
            .collect::<Result<_, _>>()
            .map_err(|e| map_sqlx_error("list", e))
    }

    #[instrument(skip(self), err)]
    async fn list_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error("list_by_category", e))?;

        let rows = sqlx::query(
            r#"
            SELECT id, name, category, size, unit
            FROM products
            WHERE category = $1
            ORDER BY id ASC
            "#,
        )
        .bind(category)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error("list_by_category", e))?;

        rows.iter()
            .map(product_from_row)
            .collect::<Result<_, _>>()
            .map_err(|e| map_sqlx_error("list_by_category", e))
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error("get", e))?;

        let row = sqlx::query("SELECT id, name, category, size, unit FROM products WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref()
            .map(product_from_row)
            .transpose()
            .map_err(|e| map_sqlx_error("get", e))
    }

    #[instrument(skip(self, next), fields(product_id = %id), err)]
    async fn update(&self, id: ProductId, next: ProductFields) -> Result<Product, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("update", e))?;

        let existing = sqlx::query("SELECT id FROM products WHERE id = $1 FOR UPDATE")
            .bind(id.as_i64())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("update", e))?;
        if existing.is_none() {
            return Err(StoreError::not_found());
        }

        let row = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, category = $3, size = $4, unit = $5
            WHERE id = $1
            RETURNING id, name, category, size, unit
            "#,
        )
        .bind(id.as_i64())
        .bind(&next.name)
        .bind(&next.category)
        .bind(next.size)
        .bind(&next.unit)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        let product = product_from_row(&row).map_err(|e| map_sqlx_error("update", e))?;

        tx.commit().await.map_err(|e| map_sqlx_error("update", e))?;
        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        let existing = sqlx::query("SELECT id FROM products WHERE id = $1 FOR UPDATE")
            .bind(id.as_i64())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        if existing.is_none() {
            return Err(StoreError::not_found());
        }

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        tx.commit().await.map_err(|e| map_sqlx_error("delete", e))?;
        Ok(())
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product::new(
        ProductId::from_i64(row.try_get("id")?),
        ProductFields {
            name: row.try_get("name")?,
            category: row.try_get("category")?,
            size: row.try_get("size")?,
            unit: row.try_get("unit")?,
        },
    ))
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
            StoreError::Backend(format!(
                "database error in {operation} [{code}]: {}",
                db_err.message()
            ))
        }
        sqlx::Error::PoolClosed => {
            StoreError::Backend(format!("connection pool closed in {operation}"))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::Backend(format!("timed out acquiring a connection in {operation}"))
        }
        other => StoreError::Backend(format!("{operation} failed: {other}")),
    }
}
