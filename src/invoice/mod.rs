//! Lab invoices: creation, totals and the display model.

mod desk;
pub mod totals;

pub use desk::*;

use chrono::{DateTime, Local, Utc};
use serde::Serialize;

use crate::document::DATE_FORMAT;
use crate::models::{GlobalSettings, InvoiceStatus, LabInvoice, PriceLookup};

/// Heading used when no lab name is configured.
pub const DEFAULT_INVOICE_TITLE: &str = "Lab Order Invoice";

/// What goes on a new invoice, besides pricing and branding.
#[derive(Debug, Clone)]
pub struct InvoiceDraft<'a> {
    pub prescription_id: Option<&'a str>,
    pub patient_name: &'a str,
    pub tests: &'a [String],
    pub discount: f64,
    pub status: InvoiceStatus,
}

/// Prices the draft and stamps it with an `INV<millis>` id.
pub fn create_invoice<P: PriceLookup + ?Sized>(
    draft: &InvoiceDraft<'_>,
    settings: &GlobalSettings,
    prices: &P,
    now: DateTime<Utc>,
) -> LabInvoice {
    let subtotal = totals::subtotal(draft.tests, prices);
    LabInvoice {
        id: format!("INV{}", now.timestamp_millis()),
        date: Some(now),
        prescription_id: draft.prescription_id.map(str::to_string),
        patient_name: draft.patient_name.to_string(),
        tests: draft.tests.to_vec(),
        subtotal,
        discount: draft.discount,
        total: totals::total(draft.tests, draft.discount, prices),
        status: draft.status,
        lab_name: settings.lab_name.clone(),
        lab_logo: settings.lab_logo.clone(),
    }
}

impl LabInvoice {
    /// Total derived again from the stored subtotal and discount.
    pub fn recomputed_total(&self) -> f64 {
        self.subtotal - totals::discount_amount(self.subtotal, self.discount)
    }

    pub fn totals_consistent(&self) -> bool {
        totals::amounts_agree(self.recomputed_total(), self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceLine {
    pub test_name: String,
    pub price: f64,
}

/// Invoice as shown on screen and printed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceView {
    pub title: String,
    pub logo: Option<String>,
    pub invoice_id: Option<String>,
    pub prescription_id: String,
    pub patient_name: String,
    pub date: String,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: f64,
    pub discount_percent: f64,
    /// Present only when a discount applies.
    pub discount_amount: Option<f64>,
    pub total: f64,
}

impl InvoiceView {
    /// Prices `tests` from scratch; nothing is taken from stored totals.
    pub fn compute<P: PriceLookup + ?Sized>(
        header: InvoiceHeader,
        tests: &[String],
        discount_percent: f64,
        prices: &P,
    ) -> Self {
        let lines = tests
            .iter()
            .map(|t| InvoiceLine {
                test_name: t.clone(),
                price: prices.price_of(t).unwrap_or(0.0),
            })
            .collect();
        let subtotal = totals::subtotal(tests, prices);

        Self {
            title: header.title,
            logo: header.logo,
            invoice_id: header.invoice_id,
            prescription_id: header.prescription_id,
            patient_name: header.patient_name,
            date: header.date,
            lines,
            subtotal,
            discount_percent,
            discount_amount: (discount_percent > 0.0)
                .then(|| totals::discount_amount(subtotal, discount_percent)),
            total: totals::total(tests, discount_percent, prices),
        }
    }

    /// Display model of a stored invoice.
    pub fn from_invoice<P: PriceLookup + ?Sized>(invoice: &LabInvoice, prices: &P) -> Self {
        let header = InvoiceHeader {
            title: invoice_title(invoice.lab_name.as_deref()),
            logo: invoice.lab_logo.clone().filter(|l| !l.is_empty()),
            invoice_id: Some(invoice.id.clone()).filter(|id| !id.is_empty()),
            prescription_id: invoice.prescription_id.clone().unwrap_or_default(),
            patient_name: invoice.patient_name.clone(),
            date: invoice.date.map(format_invoice_date).unwrap_or_else(|| "N/A".into()),
        };
        Self::compute(header, &invoice.tests, invoice.discount, prices)
    }
}

/// Non-monetary part of an [`InvoiceView`].
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceHeader {
    pub title: String,
    pub logo: Option<String>,
    pub invoice_id: Option<String>,
    pub prescription_id: String,
    pub patient_name: String,
    pub date: String,
}

pub fn invoice_title(lab_name: Option<&str>) -> String {
    crate::resolve::resolve([lab_name], DEFAULT_INVOICE_TITLE)
}

pub fn format_invoice_date(date: DateTime<Utc>) -> String {
    date.with_timezone(&Local).format(DATE_FORMAT).to_string()
}
