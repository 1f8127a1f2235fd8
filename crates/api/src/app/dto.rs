use serde::Serialize;

use storeroom_products::{NewProduct, ProductUpdate};

// -------------------------
// Request DTOs
// -------------------------

/// `POST /products/` body: `{name, category, size, unit}`.
pub type CreateProductRequest = NewProduct;

/// `PUT /products/{id}` body: the full product; a body `id` is ignored.
pub type UpdateProductRequest = ProductUpdate;

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
}
