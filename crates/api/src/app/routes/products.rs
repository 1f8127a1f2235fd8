use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use storeroom_products::{Product, ProductFields, ProductId, ProductUpdate};

use crate::app::dto::{CreateProductRequest, UpdateProductRequest};
use crate::app::errors::{ApiError, ErrorBody};
use crate::app::services::AppServices;

/// Product routes, served with and without the trailing slash.
///
/// `/products/:key` is a category for GET and a product id for PUT/DELETE.
pub fn router() -> Router {
    Router::new()
        .route("/products/", post(create_product).get(list_products))
        .route("/products", post(create_product).get(list_products))
        .route(
            "/products/:key",
            get(list_products_by_category)
                .put(update_product)
                .delete(delete_product),
        )
}

/// Create a product
///
/// Create a new product with name, category (like 'fridge' or 'storage'), size and unit.
#[utoipa::path(
    post,
    path = "/products/",
    tag = "Products",
    request_body = ProductFields,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 422, description = "Missing or mistyped field", body = ErrorBody),
    )
)]
pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;

    let product = services.products().create(body).await?;
    tracing::info!(product_id = %product.id, category = %product.category(), "product created");

    Ok((StatusCode::CREATED, Json(product)).into_response())
}

/// List products
///
/// Returns a list with all products in database.
#[utoipa::path(
    get,
    path = "/products/",
    tag = "Products",
    responses((status = 200, description = "All products", body = [Product]))
)]
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(services.products().list().await?))
}

/// List products from category
///
/// Returns a list with all products from a specific category.
#[utoipa::path(
    get,
    path = "/products/{category}",
    tag = "Products",
    params(("category" = String, Path, description = "Exact category label")),
    responses((status = 200, description = "Products in the category, possibly none", body = [Product]))
)]
pub async fn list_products_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(category): Path<String>,
) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(services.products().list_by_category(&category).await?))
}

/// Update products
///
/// Updates data from specific product.
#[utoipa::path(
    put,
    path = "/products/{product_id}",
    tag = "Products",
    params(("product_id" = i64, Path, description = "Product id")),
    request_body = ProductUpdate,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Product id is not an integer", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
        (status = 422, description = "Missing or mistyped field", body = ErrorBody),
    )
)]
pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let product_id: ProductId = id.parse()?;
    let Json(body) = body?;

    if let Some(body_id) = body.id.filter(|b| *b != product_id) {
        tracing::debug!(%product_id, %body_id, "ignoring mismatched id in update body");
    }

    let product = services
        .products()
        .update(product_id, body.into_fields())
        .await
        .inspect_err(|e| {
            if e.is_not_found() {
                tracing::debug!(%product_id, "update target not found");
            }
        })?;
    tracing::info!(%product_id, "product updated");

    Ok(Json(product))
}

/// Delete products
///
/// Deletes a specific product.
#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    tag = "Products",
    params(("product_id" = i64, Path, description = "Product id")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 400, description = "Product id is not an integer", body = ErrorBody),
        (status = 404, description = "Product not found", body = ErrorBody),
    )
)]
pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let product_id: ProductId = id.parse()?;

    services
        .products()
        .delete(product_id)
        .await
        .inspect_err(|e| {
            if e.is_not_found() {
                tracing::debug!(%product_id, "delete target not found");
            }
        })?;
    tracing::info!(%product_id, "product deleted");

    Ok(StatusCode::NO_CONTENT)
}
