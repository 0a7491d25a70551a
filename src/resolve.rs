//! Canonical patient identity from redundant sources.
//!
//! A prescription can carry the same attribute in up to three places. Each
//! attribute has a fixed candidate order and its own fallback literal; the
//! first candidate that is present and non-empty wins.

use crate::models::PrescriptionRecord;

pub const UNKNOWN_PATIENT: &str = "Unknown Patient";
pub const NOT_SPECIFIED: &str = "Not Specified";
pub const NOT_PROVIDED: &str = "Not Provided";

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Index of the winning candidate in the chain.
    Candidate(usize),
    Fallback,
}

/// Returns the first candidate that is neither absent nor empty, else the
/// fallback.
pub fn resolve<'a, I>(candidates: I, fallback: &str) -> String
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    resolve_traced(candidates, fallback).0
}

/// [`resolve`] plus the source of the value.
pub fn resolve_traced<'a, I>(candidates: I, fallback: &str) -> (String, Resolution)
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .enumerate()
        .find_map(|(i, c)| match c {
            Some(value) if !value.is_empty() => Some((value.to_string(), Resolution::Candidate(i))),
            _ => None,
        })
        .unwrap_or_else(|| (fallback.to_string(), Resolution::Fallback))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientField {
    Name,
    Gender,
    Age,
    Phone,
}

impl PatientField {
    pub const ALL: [PatientField; 4] = [Self::Name, Self::Gender, Self::Age, Self::Phone];

    pub fn fallback(&self) -> &'static str {
        match self {
            Self::Name => UNKNOWN_PATIENT,
            Self::Gender | Self::Age => NOT_SPECIFIED,
            Self::Phone => NOT_PROVIDED,
        }
    }

    /// Candidates in priority order: top-level field, nested patient field,
    /// alternately named top-level field.
    pub fn candidates(&self, record: &PrescriptionRecord) -> [Option<String>; 3] {
        let nested = record.patient.as_ref();
        match self {
            Self::Name => [
                record.patient_name.clone(),
                nested.and_then(|p| p.name.clone()),
                nested.and_then(|p| p.patient_name.clone()),
            ],
            Self::Gender => [
                record.gender.clone(),
                nested.and_then(|p| p.gender.clone()),
                record.patient_gender.clone(),
            ],
            Self::Age => [
                record.age.as_ref().map(|a| a.to_text()),
                nested.and_then(|p| p.age_text()),
                record.patient_age.as_ref().map(|a| a.to_text()),
            ],
            Self::Phone => [
                record.phone.clone(),
                nested.and_then(|p| p.phone_number.clone()),
                record.patient_phone.clone(),
            ],
        }
    }

    pub fn resolve(&self, record: &PrescriptionRecord) -> (String, Resolution) {
        let candidates = self.candidates(record);
        let (value, source) =
            resolve_traced(candidates.iter().map(|c| c.as_deref()), self.fallback());
        tracing::trace!(field = ?self, ?source, value = %value, "Resolved patient field");
        (value, source)
    }
}

/// Canonical identity for one prescription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub name: String,
    pub gender: String,
    pub age: String,
    pub phone: String,
    /// Fields no source supplied, in [`PatientField::ALL`] order.
    defaulted: [bool; 4],
}

impl ResolvedIdentity {
    /// True when `field` holds its fallback literal.
    pub fn defaulted(&self, field: PatientField) -> bool {
        self.defaulted[field as usize]
    }
}

pub fn resolve_identity(record: &PrescriptionRecord) -> ResolvedIdentity {
    let [name, gender, age, phone] = PatientField::ALL.map(|field| field.resolve(record));
    ResolvedIdentity {
        defaulted: [&name, &gender, &age, &phone].map(|(_, source)| *source == Resolution::Fallback),
        name: name.0,
        gender: gender.0,
        age: age.0,
        phone: phone.0,
    }
}

/// Just the patient name, as shown on invoices and lab orders.
pub fn resolve_patient_name(record: &PrescriptionRecord) -> String {
    PatientField::Name.resolve(record).0
}
