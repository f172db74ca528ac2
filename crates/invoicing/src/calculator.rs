//! Invoice totals and payment allocation.
//!
//! All functions here are pure: they read a document (or a row) and return a
//! derived value. Invalid numbers are coerced to `0`, so nothing here fails.

use serde::{Deserialize, Serialize};

use crate::document::{DiscountType, InvoiceDocument, LineItem};
use crate::editor::LineItemChange;
use crate::numeric::numeric;

/// Totals derived from an [`InvoiceDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    /// Plain sum of line totals (not rounded).
    pub subtotal: f64,
    /// Discount actually applied; never more than `subtotal`.
    pub discount_amount: f64,
    /// `subtotal - discount_amount`, rounded to a whole currency unit.
    pub grand_total: f64,
}

/// Derive subtotal, discount and grand total.
///
/// The grand total is rounded half away from zero. It is never negative, so
/// this is the same as rounding half up.
pub fn compute_totals(doc: &InvoiceDocument) -> Totals {
    let subtotal: f64 = doc.items().iter().map(|item| numeric(item.total)).sum();

    let discount_value = numeric(doc.discount_value()).max(0.0);
    let raw_discount = match doc.discount_type() {
        DiscountType::Percent => subtotal * (discount_value / 100.0),
        DiscountType::Fixed => discount_value,
    };
    let discount_amount = raw_discount.min(subtotal);

    let grand_total = numeric((subtotal - discount_amount).round()).max(0.0);

    Totals {
        subtotal,
        discount_amount,
        grand_total,
    }
}

/// Apply one field edit to a line item and return the updated row.
///
/// Rate and quantity edits recompute `total` from the new value and the other
/// field's prior value; description edits leave `total` alone.
pub fn recalculate_line_item(item: &LineItem, change: LineItemChange) -> LineItem {
    let mut updated = item.clone();
    match change {
        LineItemChange::Description(description) => {
            updated.description = description;
            return updated;
        }
        LineItemChange::Rate(rate) => updated.rate = numeric(rate),
        LineItemChange::Quantity(quantity) => updated.quantity = numeric(quantity),
    }
    updated.total = numeric(updated.rate) * numeric(updated.quantity);
    updated
}

/// Amount to pre-fill on a newly appended payment row: whatever part of
/// `grand_total` the existing rows do not cover yet, floored at `0`.
pub fn suggest_next_payment_amount(doc: &InvoiceDocument, grand_total: f64) -> f64 {
    let allocated: f64 = doc.payments().iter().map(|p| numeric(p.amount)).sum();
    (numeric(grand_total) - allocated).max(0.0)
}
