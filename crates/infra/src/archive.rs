//! Saving, finding and reopening invoices from the editor.

use chrono::NaiveDate;

use servicebill_core::RecordId;
use servicebill_invoicing::{InvoiceDocument, compute_totals};

use crate::error::StoreError;
use crate::record_store::{InvoiceRecordStore, SavedInvoice};

/// Result of archiving the current document.
#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveOutcome {
    Saved(SavedInvoice),
    /// The invoice number was already taken. The document now carries a new
    /// number and nothing was stored; saving again will use the new number.
    Renumbered { previous: String, next: String },
}

/// Editor-facing persistence workflow over an [`InvoiceRecordStore`].
#[derive(Debug, Clone)]
pub struct InvoiceArchive<S> {
    store: S,
    invoice_prefix: String,
}

impl<S: InvoiceRecordStore> InvoiceArchive<S> {
    pub fn new(store: S, invoice_prefix: impl Into<String>) -> Self {
        Self {
            store,
            invoice_prefix: invoice_prefix.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn invoice_prefix(&self) -> &str {
        &self.invoice_prefix
    }

    /// A fresh document numbered with the configured prefix.
    pub fn new_document(&self, date: NaiveDate, logo: Option<String>) -> InvoiceDocument {
        InvoiceDocument::with_prefix(&self.invoice_prefix, date, logo)
    }

    /// Discard all edits in `doc`, renumbering it with the configured prefix.
    pub fn reset(&self, doc: &mut InvoiceDocument, date: NaiveDate, logo: Option<String>) {
        doc.reset(&self.invoice_prefix, date, logo);
    }

    /// Save a snapshot of `doc` with its current grand total.
    ///
    /// A blank customer name is rejected before anything is stored. On an
    /// invoice number collision `doc` is renumbered in place.
    pub fn archive(&self, doc: &mut InvoiceDocument) -> Result<ArchiveOutcome, StoreError> {
        if doc.customer().name.trim().is_empty() {
            return Err(StoreError::MissingCustomerName);
        }

        let totals = compute_totals(doc);
        match self.store.save(doc, totals.grand_total) {
            Ok(record) => Ok(ArchiveOutcome::Saved(record)),
            Err(StoreError::DuplicateInvoiceNo(_)) => {
                let previous = doc.renumber(&self.invoice_prefix);
                let next = doc.invoice_no().to_string();
                tracing::info!(%previous, %next, "invoice renumbered after collision");
                Ok(ArchiveOutcome::Renumbered { previous, next })
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    invoice_no = %doc.invoice_no(),
                    "failed to save invoice"
                );
                Err(e)
            }
        }
    }

    pub fn search(&self, term: &str) -> Result<Vec<SavedInvoice>, StoreError> {
        self.store.search(term)
    }

    /// Load a stored invoice into the editor, replacing `doc` entirely.
    ///
    /// A stored document without line items or payments is refused and `doc`
    /// is left as it was.
    pub fn open(&self, id: RecordId, doc: &mut InvoiceDocument) -> Result<(), StoreError> {
        let record = self.store.get(id)?.ok_or(StoreError::NotFound(id))?;
        if let Err(e) = doc.replace_with(record.data) {
            tracing::warn!(record_id = %id, error = %e, "stored invoice rejected");
            return Err(e.into());
        }
        Ok(())
    }

    pub fn delete(&self, id: RecordId) -> Result<(), StoreError> {
        if self.store.delete(id)? {
            Ok(())
        } else {
            Err(StoreError::NotFound(id))
        }
    }
}
