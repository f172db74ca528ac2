//! `servicebill <invoice.json>`: print the totals of a saved invoice document.
//! `servicebill new`: print a fresh invoice document dated today.
//!
//! Accepts either a bare document or a stored record (with the document under
//! `data`). Logs go to stderr; output is printed to stdout as JSON.

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

use servicebill_infra::{AppConfig, BrandingPreferences, InMemoryPreferenceStore, SavedInvoice};
use servicebill_invoicing::{
    InvoiceDocument, Totals, compute_totals, suggest_next_payment_amount,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum Input {
    Record(Box<SavedInvoice>),
    Document(Box<InvoiceDocument>),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    invoice_no: &'a str,
    customer_name: &'a str,
    #[serde(flatten)]
    totals: Totals,
    allocated: f64,
    unallocated: f64,
}

fn main() -> anyhow::Result<()> {
    servicebill_observability::init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: servicebill <invoice.json> | servicebill new");
    };

    if path == "new" {
        let today = chrono::Utc::now().date_naive();
        let doc = InvoiceDocument::with_prefix(&config.invoice_prefix, today, None);
        tracing::info!(invoice_no = %doc.invoice_no(), "new invoice document");
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    let raw =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    let doc = match serde_json::from_str::<Input>(&raw)
        .with_context(|| format!("{path} is neither an invoice document nor a saved record"))?
    {
        Input::Record(record) => {
            tracing::info!(record_id = %record.id, "loaded saved record");
            record.data
        }
        Input::Document(doc) => *doc,
    };

    let totals = compute_totals(&doc);
    let allocated: f64 = doc.payments().iter().map(|p| p.amount).sum();
    let report = Report {
        invoice_no: doc.invoice_no(),
        customer_name: &doc.customer().name,
        totals,
        allocated,
        unallocated: suggest_next_payment_amount(&doc, totals.grand_total),
    };

    tracing::info!(
        invoice_no = %doc.invoice_no(),
        items = doc.items().len(),
        grand_total = totals.grand_total,
        "computed invoice totals"
    );
    if allocated > totals.grand_total {
        tracing::warn!(allocated, grand_total = totals.grand_total, "payments exceed grand total");
    }
    if let Some(logo) = doc.logo() {
        // Rejections are logged by the preference store; the report still prints.
        let branding =
            BrandingPreferences::new(InMemoryPreferenceStore::new(), config.logo_max_bytes);
        if branding.set_logo(logo).is_err() {
            tracing::warn!(invoice_no = %doc.invoice_no(), "embedded logo would not be accepted");
        }
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
