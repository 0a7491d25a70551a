//! Invoice list screen: search, ordering and row formatting, plus the
//! catalog test picker filter.

use serde::Serialize;

use crate::invoice::format_invoice_date;
use crate::invoice::totals::format_amount;
use crate::models::{DiagnosticTest, LabInvoice, TestCatalog};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceRow {
    pub id: String,
    pub date: String,
    pub patient_name: String,
    pub prescription_id: String,
    pub total: String,
    pub status: &'static str,
}

/// Case-insensitive substring match on patient name, invoice id or
/// prescription id. Invoices without an id or patient name never match.
pub fn matches_query(invoice: &LabInvoice, query: &str) -> bool {
    if invoice.id.is_empty() || invoice.patient_name.is_empty() {
        return false;
    }
    let needle = query.to_lowercase();
    let contains = |field: &str| field.to_lowercase().contains(&needle);

    contains(&invoice.patient_name)
        || contains(&invoice.id)
        || invoice.prescription_id.as_deref().is_some_and(contains)
}

pub fn filter_invoices<'a>(invoices: &'a [LabInvoice], query: &str) -> Vec<&'a LabInvoice> {
    invoices.iter().filter(|i| matches_query(i, query)).collect()
}

/// Newest first. Equal dates keep their input order; undated invoices go
/// last.
pub fn sort_by_date_desc(invoices: &mut [&LabInvoice]) {
    invoices.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Filtered, sorted and formatted for the list table.
pub fn invoice_rows(invoices: &[LabInvoice], query: &str) -> Vec<InvoiceRow> {
    let mut visible = filter_invoices(invoices, query);
    sort_by_date_desc(&mut visible);
    visible.into_iter().map(to_row).collect()
}

fn to_row(invoice: &LabInvoice) -> InvoiceRow {
    InvoiceRow {
        id: invoice.id.clone(),
        date: invoice.date.map(format_invoice_date).unwrap_or_else(|| "N/A".into()),
        patient_name: invoice.patient_name.clone(),
        prescription_id: invoice
            .prescription_id
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "-".into()),
        total: format_amount(invoice.total),
        status: invoice.status.label(),
    }
}

/// Catalog tests whose name contains `term` (case-insensitive), minus the
/// ones already picked.
pub fn available_tests<'a>(
    catalog: &'a TestCatalog,
    term: &str,
    selected: &[String],
) -> Vec<&'a DiagnosticTest> {
    let needle = term.to_lowercase();
    catalog
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .filter(|t| !selected.iter().any(|s| *s == t.name))
        .collect()
}
