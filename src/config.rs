use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "ClinicDesk";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,clinicdesk_lib=debug"
}

/// Get the application data directory
/// ~/ClinicDesk/ on all platforms, falling back to the working directory
/// when no home directory can be determined.
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Directory where saved prescription PDFs land.
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

/// Location of the persisted clinic/doctor settings.
pub fn settings_path() -> PathBuf {
    app_data_dir().join("settings.json")
}
