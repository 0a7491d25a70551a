use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Invoice lifecycle as recorded by the lab desk. Values written by other
/// screens (or missing) read back as `Unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Saved,
    Printed,
    #[default]
    #[serde(other)]
    Unknown,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Printed => "printed",
            Self::Unknown => "unknown",
        }
    }

    /// Badge text in the invoice list.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Saved => "Saved",
            Self::Printed => "Printed",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabInvoice {
    pub id: String,
    pub date: Option<DateTime<Utc>>,
    pub prescription_id: Option<String>,
    pub patient_name: String,
    pub tests: Vec<String>,
    pub subtotal: f64,
    /// Percentage, 0-100 by convention.
    pub discount: f64,
    pub total: f64,
    pub status: InvoiceStatus,
    pub lab_name: Option<String>,
    pub lab_logo: Option<String>,
}
