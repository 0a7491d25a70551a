//! Front-end data shapes. Everything deserializes from the camelCase JSON
//! the clinic screens produce, with every field optional on input.

pub mod catalog;
pub mod invoice;
pub mod patient;
pub mod prescription;
pub mod settings;

pub use catalog::{DiagnosticTest, PriceLookup, TestCatalog};
pub use invoice::{InvoiceStatus, LabInvoice};
pub use patient::{NestedPatient, TextOrNumber};
pub use prescription::{
    normalize_lab_tests, DiagnosisTemplate, LabTestEntry, Medication, PrescriptionRecord,
    VitalSigns,
};
pub use settings::GlobalSettings;
