//! OpenAPI document and Swagger UI.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use storeroom_products::{Product, ProductFields, ProductUpdate};

use crate::app::errors::ErrorBody;
use crate::app::routes::products;

pub const OPENAPI_JSON: &str = "/openapi.json";
pub const DOCS: &str = "/docs";

#[derive(OpenApi)]
#[openapi(
    info(title = "storeroom", description = "Product inventory CRUD service"),
    paths(
        products::create_product,
        products::list_products,
        products::list_products_by_category,
        products::update_product,
        products::delete_product,
    ),
    components(schemas(Product, ProductFields, ProductUpdate, ErrorBody)),
    tags((name = "Products", description = "Product create, list, update and delete"))
)]
pub struct ApiDoc;

/// Swagger UI at `/docs`, backed by the document at `/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(DOCS).url(OPENAPI_JSON, ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_product_operation() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths["/products/"].post.is_some());
        assert!(paths["/products/"].get.is_some());
        assert!(paths["/products/{category}"].get.is_some());
        assert!(paths["/products/{product_id}"].put.is_some());
        assert!(paths["/products/{product_id}"].delete.is_some());
    }

    #[test]
    fn operations_carry_summary_and_tag() {
        let doc = ApiDoc::openapi();
        let create = doc.paths.paths["/products/"].post.as_ref().unwrap();

        assert_eq!(create.summary.as_deref(), Some("Create a product"));
        assert_eq!(create.tags.as_deref(), Some(&["Products".to_string()][..]));
    }
}
