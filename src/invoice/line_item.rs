//! Invoice line items and the per-line calculation

use crate::core::error::ValidationError;
use crate::core::validation::{ValidationConfig, validators::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One invoice row with its derived monetary fields
///
/// The derived fields are always the result of [`InvoiceLineItem::recompute`]
/// over the four inputs. Nothing is rounded here; rounding to currency units
/// is a display concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLineItem {
    pub id: Uuid,
    pub product_id: Option<Uuid>,
    pub description: String,

    pub price: f64,
    pub quantity: f64,
    pub discount_percent: f64,
    pub tax_rate_percent: f64,

    /// `price * quantity`
    pub subtotal: f64,
    /// `subtotal * discount_percent / 100`
    pub discount_amount: f64,
    /// `(subtotal - discount_amount) * tax_rate_percent / 100`
    pub tax_amount: f64,
    /// `subtotal - discount_amount + tax_amount`
    pub total: f64,
}

impl InvoiceLineItem {
    /// Build a line and compute its derived fields.
    ///
    /// Inputs are taken as-is; callers validate them first through
    /// [`LineItemInput::validate`].
    pub fn new(
        product_id: Option<Uuid>,
        description: impl Into<String>,
        price: f64,
        quantity: f64,
        discount_percent: f64,
        tax_rate_percent: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            description: description.into(),
            price,
            quantity,
            discount_percent,
            tax_rate_percent,
            subtotal: 0.0,
            discount_amount: 0.0,
            tax_amount: 0.0,
            total: 0.0,
        }
        .recompute()
    }

    /// Return a copy with the derived fields recomputed from the inputs.
    ///
    /// The evaluation order is fixed: subtotal, discount, taxable base, tax,
    /// total.
    pub fn recompute(&self) -> Self {
        let subtotal = self.price * self.quantity;
        let discount_amount = subtotal * self.discount_percent / 100.0;
        let taxable_base = subtotal - discount_amount;
        let tax_amount = taxable_base * self.tax_rate_percent / 100.0;
        let total = taxable_base + tax_amount;

        Self {
            subtotal,
            discount_amount,
            tax_amount,
            total,
            ..self.clone()
        }
    }

    /// Amount the tax is charged on
    pub fn taxable_base(&self) -> f64 {
        self.subtotal - self.discount_amount
    }

    /// Net price of one unit after discount, before tax
    pub fn net_unit_price(&self) -> Option<f64> {
        (self.quantity != 0.0).then(|| self.taxable_base() / self.quantity)
    }
}

/// Raw line values as entered by a user, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemInput {
    #[serde(default)]
    pub product_id: Option<Uuid>,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub quantity: f64,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub tax_rate_percent: f64,
}

impl LineItemInput {
    pub fn new(price: f64, quantity: f64, discount_percent: f64, tax_rate_percent: f64) -> Self {
        Self {
            product_id: None,
            description: String::new(),
            price,
            quantity,
            discount_percent,
            tax_rate_percent,
        }
    }

    pub fn with_product(mut self, product_id: Uuid, description: impl Into<String>) -> Self {
        self.product_id = Some(product_id);
        self.description = description.into();
        self
    }

    /// Rules every line must satisfy before it reaches the calculator
    pub fn validation_config() -> ValidationConfig {
        let mut config = ValidationConfig::new();
        for field in ["price", "quantity", "discount_percent", "tax_rate_percent"] {
            config.add_validator(field, finite_number());
            config.add_validator(field, non_negative());
        }
        config.add_validator("discount_percent", max_value(100.0));
        config
    }

    /// Validate the input and build the computed line
    pub fn validate(&self) -> Result<InvoiceLineItem, ValidationError> {
        let payload = serde_json::to_value(self).map_err(|e| ValidationError::InvalidJson {
            message: e.to_string(),
        })?;
        Self::validation_config().validate(&payload)?;

        Ok(InvoiceLineItem::new(
            self.product_id,
            self.description.clone(),
            self.price,
            self.quantity,
            self.discount_percent,
            self.tax_rate_percent,
        ))
    }
}

impl From<&InvoiceLineItem> for LineItemInput {
    fn from(line: &InvoiceLineItem) -> Self {
        Self {
            product_id: line.product_id,
            description: line.description.clone(),
            price: line.price,
            quantity: line.quantity,
            discount_percent: line.discount_percent,
            tax_rate_percent: line.tax_rate_percent,
        }
    }
}
