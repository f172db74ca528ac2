//! Invoicing domain module for the workshop invoice editor.
//!
//! This crate contains the invoice document model, the totals calculator and
//! the field-by-field editing operations, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod calculator;
pub mod document;
pub mod editor;
pub mod numeric;

pub use calculator::{
    Totals, compute_totals, recalculate_line_item, suggest_next_payment_amount,
};
pub use document::{
    CustomerDetails, DEFAULT_INVOICE_PREFIX, DiscountType, InvoiceDocument, LineItem, Payment,
    PaymentMethod, generate_invoice_no,
};
pub use editor::{CustomerField, LineItemChange, PaymentChange};
pub use numeric::{numeric, parse_numeric};
