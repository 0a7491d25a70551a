//! Render-ready prescription document.
//!
//! `build` turns a loosely-filled [`PrescriptionRecord`] plus the clinic
//! settings into a [`RenderDocument`] with every value resolved, so the
//! layout code never has to deal with missing data.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::settings::*;
use crate::models::{GlobalSettings, Medication, PrescriptionRecord};
use crate::resolve::{resolve, resolve_identity, PatientField};

/// Display format for dates on printed documents.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicBlock {
    pub name: String,
    pub address: String,
    pub location: String,
    pub phone: String,
    pub website: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorBlock {
    pub name: String,
    pub qualifications: String,
    pub reg_no: String,
    pub specialization: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientBlock {
    pub name: String,
    pub gender: String,
    pub age: String,
    pub weight: String,
    pub bp: String,
    pub temperature: String,
    pub phone: String,
    pub allergies: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionBlock {
    pub id: String,
    pub visit_id: String,
    pub date: String,
    pub patient: PatientBlock,
    pub symptoms: String,
    pub medications: Vec<Medication>,
    pub lab_tests: Vec<String>,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderDocument {
    pub clinic: ClinicBlock,
    pub doctor: DoctorBlock,
    pub prescription: PrescriptionBlock,
    /// Logo payload as configured; decoded by the renderer.
    pub logo: Option<String>,
}

pub fn build(record: &PrescriptionRecord, settings: &GlobalSettings) -> RenderDocument {
    build_at(record, settings, Local::now())
}

/// Same as [`build`] with an explicit clock for generated ids and dates.
pub fn build_at(
    record: &PrescriptionRecord,
    settings: &GlobalSettings,
    now: DateTime<Local>,
) -> RenderDocument {
    let millis = now.timestamp_millis();

    let document = RenderDocument {
        clinic: clinic_block(settings),
        doctor: doctor_block(settings),
        prescription: PrescriptionBlock {
            id: resolve([record.prescription_id.as_deref()], &format!("OPD{millis}")),
            visit_id: resolve([record.visit_id.as_deref()], &format!("OCID{millis}")),
            date: document_date(record.date.as_deref(), now),
            patient: patient_block(record),
            symptoms: text_or_empty(&record.symptoms),
            medications: record.medications.clone(),
            lab_tests: record.lab_test_names(),
            advice: text_or_empty(&record.advice),
        },
        logo: settings.clinic_logo.clone().filter(|l| !l.is_empty()),
    };

    tracing::debug!(
        prescription_id = %document.prescription.id,
        medications = document.prescription.medications.len(),
        lab_tests = document.prescription.lab_tests.len(),
        "Built prescription document"
    );
    document
}

pub fn clinic_block(settings: &GlobalSettings) -> ClinicBlock {
    ClinicBlock {
        name: resolve([settings.clinic_name.as_deref()], DEFAULT_CLINIC_NAME),
        address: resolve([settings.clinic_address.as_deref()], DEFAULT_CLINIC_ADDRESS),
        location: resolve([settings.clinic_location.as_deref()], DEFAULT_CLINIC_LOCATION),
        phone: resolve([settings.clinic_phone.as_deref()], DEFAULT_CLINIC_PHONE),
        website: resolve([settings.clinic_website.as_deref()], DEFAULT_CLINIC_WEBSITE),
    }
}

pub fn doctor_block(settings: &GlobalSettings) -> DoctorBlock {
    DoctorBlock {
        name: resolve([settings.doctor_name.as_deref()], DEFAULT_DOCTOR_NAME),
        qualifications: resolve(
            [settings.doctor_qualifications.as_deref()],
            DEFAULT_DOCTOR_QUALIFICATIONS,
        ),
        reg_no: resolve([settings.doctor_reg_no.as_deref()], DEFAULT_DOCTOR_REG_NO),
        specialization: resolve(
            [settings.doctor_specialization.as_deref()],
            DEFAULT_DOCTOR_SPECIALIZATION,
        ),
    }
}

fn patient_block(record: &PrescriptionRecord) -> PatientBlock {
    let identity = resolve_identity(record);
    let vitals = record.vital_signs.clone().unwrap_or_default();

    let mut block = PatientBlock {
        name: identity.name.clone(),
        gender: identity.gender.clone(),
        age: identity.age.clone(),
        weight: vitals.weight.map(|w| w.to_text()).unwrap_or_default(),
        bp: vitals.blood_pressure.unwrap_or_default(),
        temperature: vitals
            .temperature
            .map(|t| t.to_text())
            .filter(|t| !t.is_empty())
            .map(|t| format!("{t} F"))
            .unwrap_or_default(),
        phone: identity.phone.clone(),
        allergies: text_or_empty(&record.known_allergies),
    };

    // No source named the patient: fall back to the nested patient object's
    // raw fields, but only for attributes still at their default. A value
    // any candidate supplied is never replaced.
    if identity.defaulted(PatientField::Name) {
        if let Some(nested) = &record.patient {
            tracing::debug!("Patient name unresolved, consulting nested patient");
            let fill = |field| identity.defaulted(field);
            override_with(&mut block.name, fill(PatientField::Name), nested.name.clone());
            override_with(&mut block.gender, fill(PatientField::Gender), nested.gender.clone());
            override_with(&mut block.age, fill(PatientField::Age), nested.age_text());
            override_with(
                &mut block.phone,
                fill(PatientField::Phone),
                nested.phone_number.clone(),
            );
        }
    }

    block
}

fn override_with(slot: &mut String, defaulted: bool, value: Option<String>) {
    if !defaulted {
        return;
    }
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        *slot = value;
    }
}

fn text_or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

/// The record's own date when it parses, otherwise the generation date.
fn document_date(raw: Option<&str>, now: DateTime<Local>) -> String {
    raw.and_then(parse_record_date)
        .unwrap_or_else(|| now.date_naive())
        .format(DATE_FORMAT)
        .to_string()
}

pub(crate) fn parse_record_date(raw: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Local).date_naive())
        .ok()
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}
