//! Product entity

use crate::core::error::ValidationError;
use crate::core::validation::{ValidationConfig, validators::*};
use crate::impl_data_entity;
use uuid::Uuid;

impl_data_entity!(
    Product,
    "product",
    "products",
    ["name", "sku", "description"],
    {
        sku: String,
        description: String,
        category_id: Option<Uuid>,
        warehouse_id: Option<Uuid>,
        provider_id: Option<Uuid>,
        price: f64,
        cost: f64,
        stock: i64,
        min_stock: i64,
        unit: String,
    }
);

impl Product {
    /// Validation applied before a product is stored
    pub fn validation_config() -> ValidationConfig {
        ValidationConfig::new()
            .with("name", string_length(1, 120))
            .with("sku", string_length(1, 40))
            .with("price", finite_number())
            .with("price", non_negative())
            .with("cost", finite_number())
            .with("cost", non_negative())
            .with("min_stock", non_negative())
            .with("status", in_list(vec!["active".into(), "inactive".into()]))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let payload = serde_json::to_value(self).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })?;
        Self::validation_config().validate(&payload)
    }

    /// Stock is at or below the reorder threshold
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.min_stock
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Value of the units on hand at cost
    pub fn stock_value(&self) -> f64 {
        self.stock as f64 * self.cost
    }
}
