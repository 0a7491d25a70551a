use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ClinicError;

pub const DEFAULT_CLINIC_NAME: &str = "Suguna Clinic";
pub const DEFAULT_CLINIC_ADDRESS: &str = "Vinayak Nagar, Hyderabad";
pub const DEFAULT_CLINIC_LOCATION: &str = "Hyderabad, Telangana";
pub const DEFAULT_CLINIC_PHONE: &str = "Ph: 9618994555";
pub const DEFAULT_CLINIC_WEBSITE: &str = "Website: sugunaclinic.com";
pub const DEFAULT_DOCTOR_NAME: &str = "Dr. Ram Kumar";
pub const DEFAULT_DOCTOR_QUALIFICATIONS: &str = "MBBS, MD, MPH (USA)";
pub const DEFAULT_DOCTOR_REG_NO: &str = "Regd No: 54371";
pub const DEFAULT_DOCTOR_SPECIALIZATION: &str = "Physician & Consultant (General Medicine)";

/// Clinic, doctor and lab branding configured on the settings screen.
/// Unset values fall back to the defaults above when a document is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    pub clinic_name: Option<String>,
    pub clinic_address: Option<String>,
    pub clinic_location: Option<String>,
    pub clinic_phone: Option<String>,
    pub clinic_website: Option<String>,
    /// Base64 image, optionally as a `data:` URL.
    pub clinic_logo: Option<String>,
    pub doctor_name: Option<String>,
    pub doctor_qualifications: Option<String>,
    pub doctor_reg_no: Option<String>,
    pub doctor_specialization: Option<String>,
    pub lab_name: Option<String>,
    pub lab_logo: Option<String>,
}

impl GlobalSettings {
    pub fn load(path: &Path) -> Result<Self, ClinicError> {
        let raw = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&raw)?;
        tracing::debug!(path = %path.display(), "Loaded clinic settings");
        Ok(settings)
    }

    /// Like [`GlobalSettings::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ClinicError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "No settings file, using clinic defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn save(&self, path: &Path) -> Result<(), ClinicError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_or_default_without_file() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = GlobalSettings::load_or_default(&tmp.path().join("settings.json")).unwrap();
        assert_eq!(settings, GlobalSettings::default());
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("settings.json");
        let settings = GlobalSettings {
            clinic_name: Some("Lotus Clinic".into()),
            lab_name: Some("Lotus Diagnostics".into()),
            ..Default::default()
        };
        settings.save(&path).unwrap();

        let loaded = GlobalSettings::load(&path).unwrap();
        assert_eq!(loaded.clinic_name.as_deref(), Some("Lotus Clinic"));
        assert_eq!(loaded.lab_name.as_deref(), Some("Lotus Diagnostics"));
        assert!(loaded.doctor_name.is_none());
    }

    #[test]
    fn load_rejects_malformed_json() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            GlobalSettings::load(&path),
            Err(ClinicError::Json(_))
        ));
    }

    #[test]
    fn reads_front_end_field_names() {
        let settings: GlobalSettings =
            serde_json::from_str(r#"{"doctorRegNo":"Regd No: 1","clinicLogo":"data:image/png;base64,AA=="}"#)
                .unwrap();
        assert_eq!(settings.doctor_reg_no.as_deref(), Some("Regd No: 1"));
        assert!(settings.clinic_logo.is_some());
    }
}
