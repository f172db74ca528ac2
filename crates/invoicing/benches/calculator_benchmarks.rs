use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use servicebill_invoicing::{
    DiscountType, InvoiceDocument, LineItemChange, compute_totals, suggest_next_payment_amount,
};

/// Build a document with `rows` line items and as many payment rows.
fn document_with_rows(rows: usize) -> InvoiceDocument {
    let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let mut doc = InvoiceDocument::new_default(date, None);
    doc.set_discount(DiscountType::Percent, 7.5);

    for i in 1..rows {
        let id = doc.add_item();
        doc.update_item(&id, LineItemChange::Rate(100.0 + i as f64))
            .unwrap();
        doc.update_item(&id, LineItemChange::Quantity((i % 5 + 1) as f64))
            .unwrap();
        doc.add_payment();
    }
    doc
}

fn bench_compute_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_totals");
    for rows in [1usize, 10, 50, 200] {
        let doc = document_with_rows(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &doc, |b, doc| {
            b.iter(|| compute_totals(black_box(doc)))
        });
    }
    group.finish();
}

fn bench_suggest_payment(c: &mut Criterion) {
    let doc = document_with_rows(50);
    let grand_total = compute_totals(&doc).grand_total;
    c.bench_function("suggest_next_payment_amount/50", |b| {
        b.iter(|| suggest_next_payment_amount(black_box(&doc), black_box(grand_total)))
    });
}

criterion_group!(benches, bench_compute_totals, bench_suggest_payment);
criterion_main!(benches);
