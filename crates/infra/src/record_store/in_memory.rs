use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::Utc;

use servicebill_core::RecordId;
use servicebill_invoicing::InvoiceDocument;

use super::{InvoiceRecordStore, SavedInvoice};
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Table {
    last_id: u64,
    rows: BTreeMap<RecordId, SavedInvoice>,
}

/// In-memory invoice table.
///
/// Intended for tests/dev. Ids are assigned sequentially starting at 1 and
/// are never reused after deletion.
#[derive(Debug, Default)]
pub struct InMemoryInvoiceStore {
    table: RwLock<Table>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl InvoiceRecordStore for InMemoryInvoiceStore {
    fn save(&self, doc: &InvoiceDocument, grand_total: f64) -> Result<SavedInvoice, StoreError> {
        let mut table = self.table.write().map_err(|_| poisoned())?;

        if table.rows.values().any(|r| r.invoice_no == doc.invoice_no()) {
            tracing::warn!(invoice_no = %doc.invoice_no(), "duplicate invoice number rejected");
            return Err(StoreError::DuplicateInvoiceNo(doc.invoice_no().to_string()));
        }

        table.last_id += 1;
        let id = RecordId::new(table.last_id);
        let record = SavedInvoice::from_document(id, Utc::now(), doc, grand_total);
        table.rows.insert(id, record.clone());

        tracing::info!(
            record_id = %id,
            invoice_no = %record.invoice_no,
            total_amount = record.total_amount,
            "invoice saved"
        );
        Ok(record)
    }

    fn search(&self, term: &str) -> Result<Vec<SavedInvoice>, StoreError> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(vec![]);
        }

        let table = self.table.read().map_err(|_| poisoned())?;
        let mut hits: Vec<SavedInvoice> = table
            .rows
            .values()
            .filter(|r| r.matches(term))
            .cloned()
            .collect();
        hits.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        tracing::debug!(term, hits = hits.len(), "invoice search");
        Ok(hits)
    }

    fn get(&self, id: RecordId) -> Result<Option<SavedInvoice>, StoreError> {
        let table = self.table.read().map_err(|_| poisoned())?;
        Ok(table.rows.get(&id).cloned())
    }

    fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
        let mut table = self.table.write().map_err(|_| poisoned())?;
        let removed = table.rows.remove(&id).is_some();
        if removed {
            tracing::info!(record_id = %id, "invoice deleted");
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use servicebill_invoicing::CustomerField;

    fn test_document(name: &str, mobile: &str) -> InvoiceDocument {
        let date = NaiveDate::from_ymd_opt(2026, 4, 2).unwrap();
        let mut doc = InvoiceDocument::new_default(date, None);
        doc.set_customer_field(CustomerField::Name, name);
        doc.set_customer_field(CustomerField::Mobile, mobile);
        doc
    }

    #[test]
    fn save_assigns_sequential_ids() {
        let store = InMemoryInvoiceStore::new();
        let a = store.save(&test_document("A", "1"), 100.0).unwrap();
        let mut second = test_document("B", "2");
        second.renumber("TCC");
        while second.invoice_no() == a.invoice_no {
            second.renumber("TCC");
        }
        let b = store.save(&second, 200.0).unwrap();

        assert_eq!(a.id, RecordId::new(1));
        assert_eq!(b.id, RecordId::new(2));
        assert_eq!(b.total_amount, 200.0);
        assert_eq!(store.len().unwrap(), 2);
    }

    #[test]
    fn duplicate_invoice_number_is_rejected() {
        let store = InMemoryInvoiceStore::new();
        let doc = test_document("A", "1");
        store.save(&doc, 100.0).unwrap();

        let err = store.save(&doc, 100.0).unwrap_err();
        assert_eq!(err, StoreError::DuplicateInvoiceNo(doc.invoice_no().to_string()));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn search_matches_invoice_number_or_mobile_newest_first() {
        let store = InMemoryInvoiceStore::new();
        let mut doc = test_document("Ravi", "9000000001");
        let first = store.save(&doc, 100.0).unwrap();
        doc.renumber("TCC");
        let second = store.save(&doc, 150.0).unwrap();

        let other = {
            let mut d = test_document("Meena", "9000000002");
            while d.invoice_no() == first.invoice_no || d.invoice_no() == second.invoice_no {
                d.renumber("TCC");
            }
            store.save(&d, 75.0).unwrap()
        };

        let by_mobile = store.search("9000000001").unwrap();
        let ids: Vec<_> = by_mobile.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);

        let by_number = store.search(&other.invoice_no).unwrap();
        assert_eq!(by_number.len(), 1);
        assert_eq!(by_number[0].customer_name, "Meena");

        assert!(store.search("   ").unwrap().is_empty());
        assert!(store.search("Ravi").unwrap().is_empty());
    }

    #[test]
    fn delete_removes_by_id() {
        let store = InMemoryInvoiceStore::new();
        let record = store.save(&test_document("A", "1"), 10.0).unwrap();

        assert!(store.delete(record.id).unwrap());
        assert!(!store.delete(record.id).unwrap());
        assert!(store.get(record.id).unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn poisoned_lock_is_reported_as_unavailable() {
        let store = std::sync::Arc::new(InMemoryInvoiceStore::new());
        let writer = {
            let store = store.clone();
            std::thread::spawn(move || {
                let _table = store.table.write().unwrap();
                panic!("writer crashed while holding the table");
            })
        };
        assert!(writer.join().is_err());

        assert!(matches!(store.len(), Err(StoreError::Unavailable(_))));
        assert!(matches!(store.is_empty(), Err(StoreError::Unavailable(_))));
        assert!(matches!(
            store.save(&test_document("A", "1"), 10.0),
            Err(StoreError::Unavailable(_))
        ));
    }

    #[test]
    fn stored_snapshot_is_independent_of_later_edits() {
        let store = InMemoryInvoiceStore::new();
        let mut doc = test_document("A", "1");
        let record = store.save(&doc, 10.0).unwrap();

        doc.set_customer_field(CustomerField::Name, "Changed");
        let stored = store.get(record.id).unwrap().unwrap();
        assert_eq!(stored.data.customer().name, "A");
    }
}
