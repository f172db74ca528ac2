//! Field-by-field editing operations on an [`InvoiceDocument`].
//!
//! Every operation is a single synchronous mutation. Totals are not cached
//! anywhere: callers re-run [`crate::compute_totals`] after each edit.

use std::collections::HashSet;

use chrono::NaiveDate;

use servicebill_core::{DomainError, DomainResult, Entity, RowId};

use crate::calculator::{compute_totals, recalculate_line_item, suggest_next_payment_amount};
use crate::document::{
    CustomerDetails, DiscountType, InvoiceDocument, LineItem, Payment, PaymentMethod,
    generate_invoice_no,
};
use crate::numeric::{numeric, parse_numeric};

/// A single edit to a line item.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemChange {
    Description(String),
    Rate(f64),
    Quantity(f64),
}

impl LineItemChange {
    /// Rate typed into a text field; unparseable input is `0`.
    pub fn rate_text(input: &str) -> Self {
        Self::Rate(parse_numeric(input))
    }

    /// Quantity typed into a text field; unparseable input is `0`.
    pub fn quantity_text(input: &str) -> Self {
        Self::Quantity(parse_numeric(input))
    }
}

/// A single edit to a payment row.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentChange {
    Method(PaymentMethod),
    Amount(f64),
    /// Transaction/reference number; an empty string clears it.
    Reference(String),
}

impl PaymentChange {
    pub fn amount_text(input: &str) -> Self {
        Self::Amount(parse_numeric(input))
    }
}

/// Editable customer/vehicle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    Name,
    Mobile,
    VehicleName,
    VehicleNumber,
    Address,
    Gstin,
}

impl InvoiceDocument {
    pub fn set_customer_field(&mut self, field: CustomerField, value: impl Into<String>) {
        let value = value.into();
        let customer = &mut self.customer;
        match field {
            CustomerField::Name => customer.name = value,
            CustomerField::Mobile => customer.mobile = value,
            CustomerField::VehicleName => customer.vehicle_name = value,
            CustomerField::VehicleNumber => customer.vehicle_number = value,
            CustomerField::Address => customer.address = value,
            CustomerField::Gstin => customer.gstin = Some(value).filter(|v| !v.is_empty()),
        }
    }

    pub fn set_customer(&mut self, customer: CustomerDetails) {
        self.customer = customer;
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    /// Set discount kind and value. Non-finite values become `0`.
    pub fn set_discount(&mut self, discount_type: DiscountType, value: f64) {
        self.discount_type = discount_type;
        self.discount_value = numeric(value);
    }

    /// Append a blank line item and return its id.
    pub fn add_item(&mut self) -> RowId {
        let id = self.fresh_row_id(|doc, id| doc.item(id).is_some());
        self.items.push(LineItem::new(id.clone()));
        id
    }

    /// Apply `change` to the line item `id` and return the updated row.
    pub fn update_item(&mut self, id: &RowId, change: LineItemChange) -> DomainResult<&LineItem> {
        let slot = self
            .items
            .iter_mut()
            .find(|i| &i.id == id)
            .ok_or_else(|| DomainError::not_found(format!("line item {id}")))?;
        *slot = recalculate_line_item(slot, change);
        Ok(&*slot)
    }

    /// Remove a line item. The last remaining row is never removed.
    ///
    /// Returns whether a row was removed.
    pub fn remove_item(&mut self, id: &RowId) -> bool {
        remove_row(&mut self.items, id)
    }

    /// Replace all line items at once (e.g. from a template).
    pub fn replace_items(&mut self, items: Vec<LineItem>) -> DomainResult<()> {
        if items.is_empty() {
            return Err(DomainError::validation("an invoice needs at least one line item"));
        }
        ensure_unique_ids(&items)?;
        self.items = items;
        Ok(())
    }

    /// Append a cash payment pre-filled with the unallocated remainder of the
    /// grand total, and return its id.
    pub fn add_payment(&mut self) -> RowId {
        let grand_total = compute_totals(self).grand_total;
        let amount = suggest_next_payment_amount(self, grand_total);
        let id = self.fresh_row_id(|doc, id| doc.payment(id).is_some());
        self.payments.push(Payment::new(id.clone(), PaymentMethod::Cash, amount));
        id
    }

    pub fn update_payment(&mut self, id: &RowId, change: PaymentChange) -> DomainResult<&Payment> {
        let payment = self
            .payments
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| DomainError::not_found(format!("payment {id}")))?;
        match change {
            PaymentChange::Method(method) => payment.method = method,
            PaymentChange::Amount(amount) => payment.amount = numeric(amount),
            PaymentChange::Reference(reference) => {
                payment.reference = Some(reference).filter(|r| !r.is_empty());
            }
        }
        Ok(&*payment)
    }

    /// Remove a payment row. The last remaining row is never removed.
    pub fn remove_payment(&mut self, id: &RowId) -> bool {
        remove_row(&mut self.payments, id)
    }

    pub fn set_logo(&mut self, logo: Option<String>) {
        self.logo = logo;
    }

    /// Discard all edits and start a fresh document numbered with `prefix`,
    /// keeping `logo` (the persisted branding image, if any).
    pub fn reset(&mut self, prefix: &str, date: NaiveDate, logo: Option<String>) {
        *self = InvoiceDocument::with_prefix(prefix, date, logo);
    }

    /// Replace the document wholesale (e.g. with a stored record's data).
    ///
    /// A document without line items or payments is rejected and `self` is
    /// left untouched. Rows sharing an id are given fresh ids, first one wins.
    pub fn replace_with(&mut self, mut other: InvoiceDocument) -> DomainResult<()> {
        if other.items.is_empty() {
            return Err(DomainError::validation("an invoice needs at least one line item"));
        }
        if other.payments.is_empty() {
            return Err(DomainError::validation("an invoice needs at least one payment"));
        }
        reassign_duplicate_ids(&mut other.items, |item| &mut item.id);
        reassign_duplicate_ids(&mut other.payments, |payment| &mut payment.id);
        *self = other;
        Ok(())
    }

    /// Assign a freshly generated invoice number and return the previous one.
    pub fn renumber(&mut self, prefix: &str) -> String {
        let mut next = generate_invoice_no(prefix);
        while next == self.invoice_no {
            next = generate_invoice_no(prefix);
        }
        core::mem::replace(&mut self.invoice_no, next)
    }

    fn fresh_row_id(&self, taken: impl Fn(&Self, &RowId) -> bool) -> RowId {
        loop {
            let id = RowId::generate();
            if !taken(self, &id) {
                return id;
            }
        }
    }
}

/// Remove the first row with `id`, unless it is the only row left.
fn remove_row<E: Entity<Id = RowId>>(rows: &mut Vec<E>, id: &RowId) -> bool {
    if rows.len() <= 1 {
        return false;
    }
    match rows.iter().position(|row| row.id() == id) {
        Some(idx) => {
            rows.remove(idx);
            true
        }
        None => false,
    }
}

fn ensure_unique_ids<E: Entity<Id = RowId>>(rows: &[E]) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for row in rows {
        if !seen.insert(row.id()) {
            return Err(DomainError::validation(format!("duplicate row id {}", row.id())));
        }
    }
    Ok(())
}

/// Give every row whose id was already used by an earlier row a fresh id.
fn reassign_duplicate_ids<E: Entity<Id = RowId>>(
    rows: &mut [E],
    id_slot: impl Fn(&mut E) -> &mut RowId,
) {
    let mut seen: HashSet<RowId> = rows.iter().map(|row| row.id().clone()).collect();
    if seen.len() == rows.len() {
        return;
    }
    let mut kept = HashSet::new();
    for row in rows.iter_mut() {
        if kept.insert(row.id().clone()) {
            continue;
        }
        let fresh = loop {
            let id = RowId::generate();
            if seen.insert(id.clone()) {
                break id;
            }
        };
        *id_slot(row) = fresh;
    }
}
