//! Purchase and sales invoices
//!
//! An [`Invoice`] owns its line items and keeps every line's derived fields in
//! sync with its inputs: lines are recomputed on each edit and the totals are
//! a fold over the current lines.

pub mod line_item;
pub mod totals;

pub use line_item::{InvoiceLineItem, LineItemInput};
pub use totals::{InvoiceTotals, aggregate};

use crate::core::error::{EntityError, InventoryError};
use crate::entities::{Movement, MovementKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the trade the invoice records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceKind {
    /// Bought from a provider; stock comes in
    Purchase,
    /// Sold to a customer; stock goes out
    Sale,
}

impl InvoiceKind {
    /// Stock movement produced by this kind of invoice
    pub fn movement_kind(&self) -> MovementKind {
        match self {
            Self::Purchase => MovementKind::Entry,
            Self::Sale => MovementKind::Exit,
        }
    }
}

/// Partial edit of a line; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineEdit {
    pub description: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
    pub discount_percent: Option<f64>,
    pub tax_rate_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub kind: InvoiceKind,
    /// Provider for purchases, customer for sales
    pub party_id: Option<Uuid>,
    pub issued_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub lines: Vec<InvoiceLineItem>,
}

impl Invoice {
    pub fn new(number: impl Into<String>, kind: InvoiceKind, party_id: Option<Uuid>) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            kind,
            party_id,
            issued_at: Utc::now(),
            notes: None,
            lines: Vec::new(),
        }
    }

    /// Validate `input` and append it as a new line; returns the line id
    pub fn add_line(&mut self, input: &LineItemInput) -> Result<Uuid, InventoryError> {
        let line = input.validate()?;
        let id = line.id;
        self.lines.push(line);

        tracing::debug!(invoice = %self.number, line = %id, lines = self.lines.len(), "line added");
        Ok(id)
    }

    pub fn line(&self, id: &Uuid) -> Option<&InvoiceLineItem> {
        self.lines.iter().find(|l| &l.id == id)
    }

    /// Apply `edit` to a line, validate the result and recompute it
    pub fn update_line(
        &mut self,
        id: &Uuid,
        edit: &LineEdit,
    ) -> Result<&InvoiceLineItem, InventoryError> {
        let index = self
            .lines
            .iter()
            .position(|l| &l.id == id)
            .ok_or_else(|| EntityError::NotFound {
                entity_type: "invoice_line".to_string(),
                id: *id,
            })?;

        let current = &self.lines[index];
        let mut input = LineItemInput::from(current);
        if let Some(description) = &edit.description {
            input.description = description.clone();
        }
        input.price = edit.price.unwrap_or(input.price);
        input.quantity = edit.quantity.unwrap_or(input.quantity);
        input.discount_percent = edit.discount_percent.unwrap_or(input.discount_percent);
        input.tax_rate_percent = edit.tax_rate_percent.unwrap_or(input.tax_rate_percent);

        let mut updated = input.validate()?;
        updated.id = *id;
        self.lines[index] = updated;

        tracing::debug!(invoice = %self.number, line = %id, "line updated");
        Ok(&self.lines[index])
    }

    /// Remove a line; returns it when it existed
    pub fn remove_line(&mut self, id: &Uuid) -> Option<InvoiceLineItem> {
        let index = self.lines.iter().position(|l| &l.id == id)?;
        let removed = self.lines.remove(index);

        tracing::debug!(invoice = %self.number, line = %id, lines = self.lines.len(), "line removed");
        Some(removed)
    }

    /// Invoice-level sums over the current lines
    pub fn totals(&self) -> InvoiceTotals {
        aggregate(&self.lines)
    }

    /// Stock movements implied by this invoice.
    ///
    /// One movement per line that references a product and moves at least
    /// one whole unit. Quantities are rounded to the nearest whole unit, so a
    /// line below half a unit moves nothing; the unit cost is the discounted
    /// net price.
    pub fn stock_movements(&self, warehouse_id: Option<Uuid>) -> Vec<Movement> {
        let kind = self.kind.movement_kind();

        self.lines
            .iter()
            .filter_map(|line| {
                let product_id = line.product_id?;
                let unit_cost = line.net_unit_price()?;
                let quantity = line.quantity.round() as i64;
                if quantity <= 0 {
                    tracing::debug!(
                        invoice = %self.number,
                        line = %line.id,
                        quantity = line.quantity,
                        "line below one unit, no stock movement"
                    );
                    return None;
                }
                if quantity as f64 != line.quantity {
                    tracing::debug!(
                        invoice = %self.number,
                        line = %line.id,
                        quantity = line.quantity,
                        rounded = quantity,
                        "fractional quantity rounded for stock movement"
                    );
                }
                Some(Movement::new(
                    format!("{} {}", kind, self.number),
                    "active".to_string(),
                    product_id,
                    warehouse_id,
                    kind,
                    quantity,
                    unit_cost,
                    Some(self.number.clone()),
                ))
            })
            .collect()
    }
}
