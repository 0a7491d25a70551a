use serde::{Deserialize, Serialize};

use super::patient::{NestedPatient, TextOrNumber};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VitalSigns {
    pub weight: Option<TextOrNumber>,
    pub blood_pressure: Option<String>,
    pub temperature: Option<TextOrNumber>,
}

/// One prescribed medicine. Every column is printed as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub interval: String,
    pub duration: String,
    pub instructions: String,
}

/// Lab tests arrive either as bare names or as catalog objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LabTestEntry {
    Name(String),
    Named { name: String },
    Other(serde_json::Value),
}

impl LabTestEntry {
    /// The test name, or `None` for entries that carry no usable name.
    pub fn name(&self) -> Option<&str> {
        match self {
            LabTestEntry::Name(name) | LabTestEntry::Named { name } => Some(name.as_str()),
            LabTestEntry::Other(_) => None,
        }
    }
}

impl From<&str> for LabTestEntry {
    fn from(name: &str) -> Self {
        LabTestEntry::Name(name.to_string())
    }
}

/// Flattens lab test entries into names, keeping order and dropping
/// entries without a name.
pub fn normalize_lab_tests(entries: &[LabTestEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(LabTestEntry::name)
        .map(str::to_string)
        .collect()
}

/// A prescription as authored on the consultation screen.
///
/// Patient identity can be carried three ways at once: the top-level
/// fields, the embedded `patient` object, and the `patient*` aliases
/// written by older screens. See [`crate::resolve`] for the priority.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrescriptionRecord {
    pub prescription_id: Option<String>,
    pub visit_id: Option<String>,
    pub patient_id: Option<String>,
    pub date: Option<String>,

    pub patient_name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<TextOrNumber>,
    pub phone: Option<String>,
    pub patient: Option<NestedPatient>,
    pub patient_gender: Option<String>,
    pub patient_age: Option<TextOrNumber>,
    pub patient_phone: Option<String>,

    pub vital_signs: Option<VitalSigns>,
    pub symptoms: Option<String>,
    pub diagnoses: Vec<String>,
    pub known_allergies: Option<String>,
    pub medications: Vec<Medication>,
    pub lab_tests: Vec<LabTestEntry>,
    pub advice: Option<String>,
    pub status: Option<String>,
}

/// Canned set of medicines and tests for a common diagnosis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosisTemplate {
    pub name: String,
    pub medications: Vec<Medication>,
    pub lab_tests: Vec<String>,
}

impl PrescriptionRecord {
    pub fn lab_test_names(&self) -> Vec<String> {
        normalize_lab_tests(&self.lab_tests)
    }

    pub fn has_lab_tests(&self) -> bool {
        !self.lab_tests.is_empty()
    }

    /// Appends the template's medicines and merges its tests, skipping
    /// tests already on the prescription.
    pub fn apply_template(&mut self, template: &DiagnosisTemplate) {
        self.medications.extend(template.medications.iter().cloned());

        for test in &template.lab_tests {
            let present = self
                .lab_tests
                .iter()
                .any(|entry| entry.name() == Some(test.as_str()));
            if !present {
                self.lab_tests.push(LabTestEntry::Name(test.clone()));
            }
        }
    }
}
