//! Products domain module.
//!
//! The product entity and the payload shapes used to create and replace it.
//! Pure data (no IO, no HTTP, no storage).

pub mod product;

pub use product::{NewProduct, Product, ProductFields, ProductId, ProductUpdate};
