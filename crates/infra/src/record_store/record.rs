use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use servicebill_core::RecordId;
use servicebill_invoicing::InvoiceDocument;

/// A stored invoice row.
///
/// The flat columns exist for lookup and listing; `data` keeps the full
/// document so the invoice can be reopened and printed again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedInvoice {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,
    pub invoice_no: String,
    pub customer_name: String,
    pub mobile: String,
    /// Grand total at the time of saving.
    pub total_amount: f64,
    pub data: InvoiceDocument,
}

impl SavedInvoice {
    /// Build the row for `doc` with server-assigned `id` and `created_at`.
    pub fn from_document(
        id: RecordId,
        created_at: DateTime<Utc>,
        doc: &InvoiceDocument,
        grand_total: f64,
    ) -> Self {
        Self {
            id,
            created_at,
            invoice_no: doc.invoice_no().to_string(),
            customer_name: doc.customer().name.clone(),
            mobile: doc.customer().mobile.clone(),
            total_amount: grand_total,
            data: doc.clone(),
        }
    }

    /// Whether this record is found by the search `term`.
    pub fn matches(&self, term: &str) -> bool {
        self.invoice_no == term || self.mobile == term
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use servicebill_invoicing::CustomerField;

    #[test]
    fn serializes_with_table_column_names() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let mut doc = InvoiceDocument::new_default(date, None);
        doc.set_customer_field(CustomerField::Name, "Kumar");
        doc.set_customer_field(CustomerField::Mobile, "9876543210");
        let created_at = Utc.with_ymd_and_hms(2026, 2, 1, 10, 30, 0).unwrap();

        let record = SavedInvoice::from_document(RecordId::new(3), created_at, &doc, 1250.0);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["invoice_no"], doc.invoice_no());
        assert_eq!(json["customer_name"], "Kumar");
        assert_eq!(json["mobile"], "9876543210");
        assert_eq!(json["total_amount"], 1250.0);
        assert_eq!(json["data"]["customer"]["name"], "Kumar");

        let back: SavedInvoice = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
