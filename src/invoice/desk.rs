//! Lab order desk: the state behind the lab invoice screen.
//!
//! The desk moves between four views. An order comes either from a
//! prescription looked up by id or from a manual order typed in at the
//! counter; either way it ends in the invoice view, where it is saved or
//! printed.

use chrono::{DateTime, Utc};

use crate::actions::{schedule_print, PrintDialog};
use crate::document::{parse_record_date, DATE_FORMAT};
use crate::error::ClinicError;
use crate::invoice_list::available_tests;
use crate::models::{
    DiagnosticTest, GlobalSettings, InvoiceStatus, LabInvoice, LabTestEntry, PrescriptionRecord,
    PriceLookup, TestCatalog,
};
use crate::resolve::{resolve_patient_name, PatientField};

use super::{create_invoice, invoice_title, InvoiceDraft, InvoiceHeader, InvoiceView};

/// Holder of saved invoices (the front-end's invoice store).
pub trait InvoiceStore {
    fn add_invoice(&mut self, invoice: LabInvoice);
    fn invoices(&self) -> &[LabInvoice];
}

#[derive(Debug, Default)]
pub struct MemoryInvoiceStore {
    invoices: Vec<LabInvoice>,
}

impl InvoiceStore for MemoryInvoiceStore {
    fn add_invoice(&mut self, invoice: LabInvoice) {
        self.invoices.push(invoice);
    }

    fn invoices(&self) -> &[LabInvoice] {
        &self.invoices
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeskView {
    #[default]
    List,
    Search,
    Create,
    Invoice,
}

#[derive(Debug, Default)]
pub struct LabOrderDesk {
    pub view: DeskView,
    /// Prescription id typed into the search view.
    pub prescription_query: String,
    /// Patient name typed into the manual order view.
    pub patient_name: String,
    /// Filter for the test picker.
    pub test_search: String,
    discount: f64,
    selected_prescription: Option<PrescriptionRecord>,
    selected_tests: Vec<String>,
}

impl LabOrderDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, view: DeskView) {
        self.view = view;
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Accepts percentages from 0 to 100.
    pub fn set_discount(&mut self, percent: f64) -> Result<(), ClinicError> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(ClinicError::Validation(
                "Discount must be between 0 and 100".into(),
            ));
        }
        self.discount = percent;
        Ok(())
    }

    pub fn selected_prescription(&self) -> Option<&PrescriptionRecord> {
        self.selected_prescription.as_ref()
    }

    pub fn selected_tests(&self) -> &[String] {
        &self.selected_tests
    }

    /// Looks up the typed prescription id (case-insensitive). Only
    /// prescriptions that ordered lab tests qualify.
    pub fn search(&mut self, prescriptions: &[PrescriptionRecord]) -> Result<(), ClinicError> {
        let query = self.prescription_query.trim();
        if query.is_empty() {
            return Err(ClinicError::Validation("Please enter a Prescription ID".into()));
        }

        let found = prescriptions.iter().find(|p| {
            p.prescription_id
                .as_deref()
                .is_some_and(|id| id.eq_ignore_ascii_case(query))
        });

        match found {
            Some(p) if p.has_lab_tests() => {
                tracing::debug!(prescription_id = query, "Prescription found for lab order");
                self.selected_prescription = Some(p.clone());
                self.selected_tests.clear();
                self.view = DeskView::Invoice;
                Ok(())
            }
            _ => Err(ClinicError::LookupMiss(
                "No lab tests found for this prescription ID".into(),
            )),
        }
    }

    /// Adds a test to the manual order once.
    pub fn select_test(&mut self, name: &str) {
        if !self.selected_tests.iter().any(|t| t == name) {
            self.selected_tests.push(name.to_string());
        }
        self.test_search.clear();
    }

    pub fn remove_test(&mut self, name: &str) {
        self.selected_tests.retain(|t| t != name);
    }

    /// Catalog tests matching the picker filter that are not yet selected.
    pub fn picker_options<'a>(&self, catalog: &'a TestCatalog) -> Vec<&'a DiagnosticTest> {
        available_tests(catalog, &self.test_search, &self.selected_tests)
    }

    /// Turns the typed name and picked tests into a walk-in prescription.
    pub fn create_manual_order(&mut self, now: DateTime<Utc>) -> Result<(), ClinicError> {
        let name = self.patient_name.trim();
        if name.is_empty() {
            return Err(ClinicError::Validation("Please enter patient name".into()));
        }
        if self.selected_tests.is_empty() {
            return Err(ClinicError::Validation("Please select at least one test".into()));
        }

        let millis = now.timestamp_millis();
        let record = PrescriptionRecord {
            prescription_id: Some(format!("M{millis}")),
            visit_id: Some(format!("MV{millis}")),
            patient_id: Some(format!("MP{millis}")),
            patient_name: Some(name.to_string()),
            date: Some(now.to_rfc3339()),
            lab_tests: self
                .selected_tests
                .drain(..)
                .map(LabTestEntry::Name)
                .collect(),
            ..Default::default()
        };
        tracing::info!(prescription_id = ?record.prescription_id, "Manual lab order created");

        self.selected_prescription = Some(record);
        self.patient_name.clear();
        self.view = DeskView::Invoice;
        Ok(())
    }

    /// Reopens a saved invoice. The prescription is matched by id or by
    /// patient name; without a match a stand-in is built from the invoice.
    pub fn view_invoice(&mut self, invoice: &LabInvoice, prescriptions: &[PrescriptionRecord]) {
        let matched = prescriptions.iter().find(|p| {
            let same_id = p.prescription_id.is_some() && p.prescription_id == invoice.prescription_id;
            // Supplied names only; the "Unknown Patient" fallback matches nobody.
            let same_patient = PatientField::Name
                .candidates(p)
                .iter()
                .flatten()
                .find(|name| !name.is_empty())
                .is_some_and(|name| name.to_lowercase() == invoice.patient_name.to_lowercase());
            same_id || same_patient
        });

        let prescription = match matched {
            Some(p) => p.clone(),
            None => {
                tracing::warn!(invoice_id = %invoice.id, "No prescription match, using invoice contents");
                PrescriptionRecord {
                    prescription_id: invoice.prescription_id.clone(),
                    patient_name: Some(invoice.patient_name.clone()),
                    date: invoice.date.map(|d| d.to_rfc3339()),
                    lab_tests: invoice
                        .tests
                        .iter()
                        .map(|name| LabTestEntry::Named { name: name.clone() })
                        .collect(),
                    status: Some("completed".into()),
                    ..Default::default()
                }
            }
        };

        self.patient_name = resolve_patient_name(&prescription);
        self.selected_prescription = Some(prescription);
        self.selected_tests = invoice.tests.clone();
        self.discount = invoice.discount;
        self.view = DeskView::Invoice;
    }

    /// Tests billed in the invoice view: the reopened invoice's tests if
    /// any, else the prescription's named tests.
    pub fn billed_tests(&self) -> Vec<String> {
        if !self.selected_tests.is_empty() {
            return self.selected_tests.clone();
        }
        self.selected_prescription
            .as_ref()
            .map(|p| {
                p.lab_test_names()
                    .into_iter()
                    .filter(|name| !name.trim().is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn invoice_view<P: PriceLookup + ?Sized>(
        &self,
        settings: &GlobalSettings,
        prices: &P,
    ) -> Option<InvoiceView> {
        let prescription = self.selected_prescription.as_ref()?;
        let date = prescription
            .date
            .as_deref()
            .and_then(parse_record_date)
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "N/A".into());

        let header = InvoiceHeader {
            title: invoice_title(settings.lab_name.as_deref()),
            logo: settings.lab_logo.clone().filter(|l| !l.is_empty()),
            invoice_id: None,
            prescription_id: prescription.prescription_id.clone().unwrap_or_default(),
            patient_name: resolve_patient_name(prescription),
            date,
        };
        Some(InvoiceView::compute(header, &self.billed_tests(), self.discount, prices))
    }

    /// Stores the invoice as saved and returns to the list.
    pub fn save<S, P>(
        &mut self,
        store: &mut S,
        settings: &GlobalSettings,
        prices: &P,
        now: DateTime<Utc>,
    ) -> Result<LabInvoice, ClinicError>
    where
        S: InvoiceStore + ?Sized,
        P: PriceLookup + ?Sized,
    {
        let invoice = self.issue(InvoiceStatus::Saved, store, settings, prices, now)?;
        self.reset();
        Ok(invoice)
    }

    /// Stores the invoice as printed, then opens the print dialog after the
    /// settle delay.
    pub async fn print<S, P, D>(
        &mut self,
        store: &mut S,
        settings: &GlobalSettings,
        prices: &P,
        dialog: &D,
        now: DateTime<Utc>,
    ) -> Result<LabInvoice, ClinicError>
    where
        S: InvoiceStore + ?Sized,
        P: PriceLookup + ?Sized,
        D: PrintDialog + ?Sized,
    {
        let invoice = self.issue(InvoiceStatus::Printed, store, settings, prices, now)?;
        schedule_print(dialog).await?;
        Ok(invoice)
    }

    fn issue<S, P>(
        &self,
        status: InvoiceStatus,
        store: &mut S,
        settings: &GlobalSettings,
        prices: &P,
        now: DateTime<Utc>,
    ) -> Result<LabInvoice, ClinicError>
    where
        S: InvoiceStore + ?Sized,
        P: PriceLookup + ?Sized,
    {
        let prescription = self
            .selected_prescription
            .as_ref()
            .ok_or_else(|| ClinicError::Validation("No lab order selected".into()))?;
        let tests = self.billed_tests();
        let patient_name = resolve_patient_name(prescription);

        let invoice = create_invoice(
            &InvoiceDraft {
                prescription_id: prescription.prescription_id.as_deref(),
                patient_name: &patient_name,
                tests: &tests,
                discount: self.discount,
                status,
            },
            settings,
            prices,
            now,
        );
        tracing::info!(
            invoice_id = %invoice.id,
            status = invoice.status.as_str(),
            total = invoice.total,
            "Lab invoice recorded"
        );
        store.add_invoice(invoice.clone());
        Ok(invoice)
    }

    /// Clears the form and returns to the list.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
