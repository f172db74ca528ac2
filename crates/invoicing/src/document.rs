//! Invoice document model: customer details, line items, payments and the
//! document that ties them together.

use chrono::{NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use servicebill_core::{DomainError, Entity, RowId};

use crate::numeric::deserialize_lenient;

/// Prefix of generated invoice numbers (`TCC4821`).
pub const DEFAULT_INVOICE_PREFIX: &str = "TCC";

/// Description given to the line item of a fresh document.
pub const DEFAULT_ITEM_DESCRIPTION: &str = "General Service";

/// Generate an invoice number: `prefix` followed by a random number in `1000..=9999`.
pub fn generate_invoice_no(prefix: &str) -> String {
    let n: u16 = rand::thread_rng().gen_range(1000..=9999);
    format!("{prefix}{n}")
}

/// How `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountType {
    /// Percentage of the subtotal.
    Percent,
    /// Flat currency amount.
    #[default]
    Fixed,
}

/// Payment method of a payment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    #[default]
    Cash,
    #[serde(rename = "UPI")]
    Upi,
    Card,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Upi,
        PaymentMethod::Card,
        PaymentMethod::BankTransfer,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::Card => "Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
        }
    }
}

impl core::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl core::str::FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PaymentMethod::ALL
            .into_iter()
            .find(|m| m.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| DomainError::validation(format!("unknown payment method: {s}")))
    }
}

/// Customer and vehicle details printed on the invoice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomerDetails {
    pub name: String,
    pub mobile: String,
    pub vehicle_name: String,
    pub vehicle_number: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
}

/// One billable service/part row.
///
/// `total` is stored so a persisted document can be re-rendered as-is; it is
/// kept equal to `rate * quantity` by [`crate::recalculate_line_item`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: RowId,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub rate: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub total: f64,
}

impl LineItem {
    /// A blank row: rate 0, quantity 1, total 0.
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            description: String::new(),
            rate: 0.0,
            quantity: 1.0,
            total: 0.0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Entity for LineItem {
    type Id = RowId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One row of a (possibly split) payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: RowId,
    #[serde(default)]
    pub method: PaymentMethod,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Payment {
    pub fn new(id: RowId, method: PaymentMethod, amount: f64) -> Self {
        Self {
            id,
            method,
            amount,
            reference: None,
        }
    }
}

impl Entity for Payment {
    type Id = RowId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// The invoice being edited.
///
/// Totals are never stored here; derive them with [`crate::compute_totals`].
/// Mutation goes through the editing operations in [`crate::editor`], which
/// keep at least one line item and one payment row in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    pub(crate) invoice_no: String,
    pub(crate) date: NaiveDate,
    #[serde(default)]
    pub(crate) customer: CustomerDetails,
    #[serde(default)]
    pub(crate) items: Vec<LineItem>,
    #[serde(default)]
    pub(crate) payments: Vec<Payment>,
    #[serde(default)]
    pub(crate) discount_type: DiscountType,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub(crate) discount_value: f64,
    /// Branding image as a data URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) logo: Option<String>,
}

impl InvoiceDocument {
    /// A fresh document dated `date`: one "General Service" row, one cash
    /// payment of 0, no discount. Numbered with [`DEFAULT_INVOICE_PREFIX`].
    pub fn new_default(date: NaiveDate, logo: Option<String>) -> Self {
        Self::with_prefix(DEFAULT_INVOICE_PREFIX, date, logo)
    }

    /// Like [`InvoiceDocument::new_default`], numbered with `prefix`.
    pub fn with_prefix(prefix: &str, date: NaiveDate, logo: Option<String>) -> Self {
        Self {
            invoice_no: generate_invoice_no(prefix),
            date,
            customer: CustomerDetails::default(),
            items: vec![
                LineItem::new(RowId::from_static("1")).with_description(DEFAULT_ITEM_DESCRIPTION),
            ],
            payments: vec![Payment::new(RowId::from_static("1"), PaymentMethod::Cash, 0.0)],
            discount_type: DiscountType::Fixed,
            discount_value: 0.0,
            logo,
        }
    }

    pub fn invoice_no(&self) -> &str {
        &self.invoice_no
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn item(&self, id: &RowId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    pub fn payment(&self, id: &RowId) -> Option<&Payment> {
        self.payments.iter().find(|p| &p.id == id)
    }

    pub fn discount_type(&self) -> DiscountType {
        self.discount_type
    }

    pub fn discount_value(&self) -> f64 {
        self.discount_value
    }

    pub fn logo(&self) -> Option<&str> {
        self.logo.as_deref()
    }
}

impl Default for InvoiceDocument {
    fn default() -> Self {
        Self::new_default(Utc::now().date_naive(), None)
    }
}
