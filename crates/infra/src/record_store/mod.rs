//! Persistence of saved invoices.
//!
//! The editor saves a snapshot of the whole document together with its grand
//! total, and later finds it again by invoice number or customer mobile.

pub mod in_memory;
pub mod record;

pub use in_memory::InMemoryInvoiceStore;
pub use record::SavedInvoice;

use std::sync::Arc;

use servicebill_core::RecordId;
use servicebill_invoicing::InvoiceDocument;

use crate::error::StoreError;

/// Table-like store of [`SavedInvoice`] records.
///
/// Implementations assign `id` and `created_at`, and enforce that invoice
/// numbers are unique across stored records.
pub trait InvoiceRecordStore: Send + Sync {
    /// Insert a snapshot of `doc`.
    ///
    /// Returns [`StoreError::DuplicateInvoiceNo`] if a record with the same
    /// invoice number already exists.
    fn save(&self, doc: &InvoiceDocument, grand_total: f64) -> Result<SavedInvoice, StoreError>;

    /// Records whose invoice number or mobile equals `term`, newest first.
    ///
    /// A blank term matches nothing.
    fn search(&self, term: &str) -> Result<Vec<SavedInvoice>, StoreError>;

    fn get(&self, id: RecordId) -> Result<Option<SavedInvoice>, StoreError>;

    /// Remove a record. Returns whether it existed.
    fn delete(&self, id: RecordId) -> Result<bool, StoreError>;
}

impl<S> InvoiceRecordStore for Arc<S>
where
    S: InvoiceRecordStore + ?Sized,
{
    fn save(&self, doc: &InvoiceDocument, grand_total: f64) -> Result<SavedInvoice, StoreError> {
        (**self).save(doc, grand_total)
    }

    fn search(&self, term: &str) -> Result<Vec<SavedInvoice>, StoreError> {
        (**self).search(term)
    }

    fn get(&self, id: RecordId) -> Result<Option<SavedInvoice>, StoreError> {
        (**self).get(id)
    }

    fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        (**self).delete(id)
    }
}
