//! Stock movement entity

use crate::core::error::ValidationError;
use crate::core::field::FieldValue;
use crate::core::validation::{ValidationConfig, validators::*};
use crate::impl_data_entity;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Goods received (purchases, returns from customers)
    Entry,
    /// Goods shipped (sales, consumption)
    Exit,
    /// Moved between warehouses
    Transfer,
    /// Manual correction after a stock count
    Adjustment,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
            Self::Transfer => "transfer",
            Self::Adjustment => "adjustment",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MovementKind> for FieldValue {
    fn from(kind: MovementKind) -> Self {
        FieldValue::String(kind.as_str().to_string())
    }
}

impl_data_entity!(
    Movement,
    "movement",
    "movements",
    ["name", "reference"],
    {
        product_id: Uuid,
        warehouse_id: Option<Uuid>,
        kind: MovementKind,
        quantity: i64,
        unit_cost: f64,
        reference: Option<String>,
    }
);

impl Movement {
    pub fn validation_config() -> ValidationConfig {
        ValidationConfig::new()
            .with("product_id", required())
            .with("unit_cost", finite_number())
            .with("unit_cost", non_negative())
    }

    /// Entries, exits and transfers must move a positive quantity; adjustments
    /// carry a signed correction.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let payload = serde_json::to_value(self).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })?;
        let mut config = Self::validation_config();
        if self.kind != MovementKind::Adjustment {
            config.add_validator("quantity", positive());
        }
        config.validate(&payload)
    }

    /// Quantity with the sign it has on the stock level
    pub fn signed_quantity(&self) -> i64 {
        match self.kind {
            MovementKind::Entry | MovementKind::Adjustment => self.quantity,
            MovementKind::Exit => -self.quantity,
            MovementKind::Transfer => 0,
        }
    }

    pub fn total_cost(&self) -> f64 {
        self.quantity as f64 * self.unit_cost
    }
}
