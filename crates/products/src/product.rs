use core::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use storeroom_core::{DomainError, Entity, RowId};

/// Product identifier, assigned by the store on insert.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub RowId);

impl ProductId {
    pub fn from_i64(value: i64) -> Self {
        Self(RowId::from_i64(value))
    }

    pub fn as_i64(&self) -> i64 {
        self.0.as_i64()
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// The four mutable product fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductFields {
    #[schema(example = "Fridge A")]
    pub name: String,
    /// Free-form grouping label, e.g. "fridge" or "storage".
    #[schema(example = "fridge")]
    pub category: String,
    #[schema(example = 180.5)]
    pub size: f64,
    /// Unit of measurement for `size`.
    #[schema(example = "cm")]
    pub unit: String,
}

/// Create payload: everything except the id.
pub type NewProduct = ProductFields;

/// Full replacement body for an update.
///
/// Clients send the whole product. A body `id` is accepted for symmetry with
/// the read shape but never changes which row is updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductUpdate {
    #[serde(default)]
    #[schema(value_type = Option<i64>)]
    pub id: Option<ProductId>,
    #[serde(flatten)]
    pub fields: ProductFields,
}

impl ProductUpdate {
    pub fn into_fields(self) -> ProductFields {
        self.fields
    }
}

/// A persisted product row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[schema(value_type = i64, example = 1)]
    pub id: ProductId,
    #[serde(flatten)]
    pub fields: ProductFields,
}

impl Product {
    pub fn new(id: ProductId, fields: ProductFields) -> Self {
        Self { id, fields }
    }

    pub fn category(&self) -> &str {
        &self.fields.category
    }

    /// Whether this product belongs to `category` (exact, case-sensitive match).
    pub fn in_category(&self, category: &str) -> bool {
        self.fields.category == category
    }

    /// Replace all four mutable fields, whether or not they changed.
    ///
    /// The id is never touched.
    pub fn overwrite(&mut self, fields: ProductFields) {
        self.fields = fields;
    }
}

impl Entity for Product {
    type Id = ProductId;

    const KIND: &'static str = "product";

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn fridge() -> ProductFields {
        ProductFields {
            name: "Fridge A".to_string(),
            category: "fridge".to_string(),
            size: 180.5,
            unit: "cm".to_string(),
        }
    }

    #[test]
    fn product_serializes_flat_with_id() {
        let product = Product::new(ProductId::from_i64(1), fridge());
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Fridge A",
                "category": "fridge",
                "size": 180.5,
                "unit": "cm",
            })
        );
    }

    #[test]
    fn create_payload_requires_every_field() {
        let err = serde_json::from_value::<NewProduct>(json!({
            "name": "Fridge A",
            "category": "fridge",
            "unit": "cm",
        }));
        assert!(err.is_err());
    }

    #[test]
    fn create_payload_accepts_integer_size() {
        let fields: NewProduct = serde_json::from_value(json!({
            "name": "Shelf",
            "category": "storage",
            "size": 2,
            "unit": "m",
        }))
        .unwrap();
        assert_eq!(fields.size, 2.0);
    }

    #[test]
    fn update_body_id_is_optional() {
        let with_id: ProductUpdate = serde_json::from_value(json!({
            "id": 9,
            "name": "Fridge B",
            "category": "fridge",
            "size": 150.0,
            "unit": "cm",
        }))
        .unwrap();
        assert_eq!(with_id.id, Some(ProductId::from_i64(9)));

        let without_id: ProductUpdate = serde_json::from_value(json!({
            "name": "Fridge B",
            "category": "fridge",
            "size": 150.0,
            "unit": "cm",
        }))
        .unwrap();
        assert_eq!(without_id.id, None);
        assert_eq!(without_id.into_fields(), with_id.into_fields());
    }

    #[test]
    fn overwrite_keeps_id() {
        let mut product = Product::new(ProductId::from_i64(3), fridge());
        let mut next = fridge();
        next.unit = "mm".to_string();

        product.overwrite(next.clone());

        assert_eq!(product.id(), ProductId::from_i64(3));
        assert_eq!(product.fields, next);
    }

    #[test]
    fn in_category_is_exact() {
        let product = Product::new(ProductId::from_i64(1), fridge());
        assert!(product.in_category("fridge"));
        assert!(!product.in_category("Fridge"));
        assert!(!product.in_category("fridge "));
    }

    #[test]
    fn not_found_message_uses_kind() {
        assert_eq!(Product::not_found_message(), "Product not found");
    }

    #[test]
    fn parse_rejects_non_numeric_ids() {
        assert!("storage".parse::<ProductId>().is_err());
        assert_eq!("12".parse::<ProductId>().unwrap(), ProductId::from_i64(12));
    }

    fn arb_fields() -> impl Strategy<Value = ProductFields> {
        (".{0,16}", "[a-z]{1,8}", -1.0e6f64..1.0e6, "[a-z]{1,4}").prop_map(
            |(name, category, size, unit)| ProductFields {
                name,
                category,
                size,
                unit,
            },
        )
    }

    proptest! {
        #[test]
        fn overwrite_replaces_all_fields(id in 1i64..10_000, before in arb_fields(), after in arb_fields()) {
            let mut product = Product::new(ProductId::from_i64(id), before);
            product.overwrite(after.clone());
            prop_assert_eq!(product.id.as_i64(), id);
            prop_assert_eq!(product.fields, after);
        }
    }
}
