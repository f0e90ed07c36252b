//! Invoice-level aggregation

use crate::invoice::line_item::InvoiceLineItem;
use serde::{Deserialize, Serialize};

/// Sums of the monetary fields across all lines of an invoice
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub tax_amount: f64,
    pub total: f64,
}

impl InvoiceTotals {
    /// Add one line's amounts to the running sums
    pub fn add_line(&mut self, line: &InvoiceLineItem) {
        self.subtotal += line.subtotal;
        self.discount_amount += line.discount_amount;
        self.tax_amount += line.tax_amount;
        self.total += line.total;
    }
}

/// Sum each monetary field independently across `items`.
///
/// `total` is the sum of line totals, not re-derived from the other sums.
pub fn aggregate(items: &[InvoiceLineItem]) -> InvoiceTotals {
    items.iter().fold(InvoiceTotals::default(), |mut totals, line| {
        totals.add_line(line);
        totals
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_aggregate_two_lines() {
        let a = InvoiceLineItem::new(None, "", 100.0, 2.0, 10.0, 19.0);
        let b = InvoiceLineItem::new(None, "", 25.0, 2.0, 0.0, 0.0);
        assert!((b.total - 50.0).abs() < EPS);

        let totals = aggregate(&[a.clone(), b.clone()]);
        assert!((totals.total - 264.2).abs() < EPS);
        assert_eq!(totals.subtotal, a.subtotal + b.subtotal);
        assert_eq!(totals.discount_amount, a.discount_amount + b.discount_amount);
        assert_eq!(totals.tax_amount, a.tax_amount + b.tax_amount);
        assert_eq!(totals.total, a.total + b.total);
    }

    #[test]
    fn test_aggregate_empty() {
        assert_eq!(aggregate(&[]), InvoiceTotals::default());
    }
}
