//! Error type shared by the document pipeline and the lab order desk.
//!
//! Variants follow the user-facing policy: validation, lookup misses and a
//! blocked preview only abort the current action, asset failures are
//! swallowed by the renderer, persistence failures propagate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    LookupMiss(String),

    #[error("Asset error: {0}")]
    Asset(String),

    #[error("Cannot write {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Preview blocked: {0}")]
    PopupBlocked(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClinicError {
    /// Advisory errors are shown to the user and leave state untouched.
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            ClinicError::Validation(_) | ClinicError::LookupMiss(_) | ClinicError::PopupBlocked(_)
        )
    }

    /// Text suitable for an alert box.
    pub fn user_message(&self) -> String {
        match self {
            ClinicError::Validation(msg)
            | ClinicError::LookupMiss(msg)
            | ClinicError::PopupBlocked(msg) => msg.clone(),
            ClinicError::Persistence { .. } | ClinicError::Pdf(_) => {
                "Error generating prescription PDF. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}
