//! Where rendered PDFs go: an in-memory blob with a preview URL, or a
//! uniquely named file.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use base64::Engine;

use crate::error::ClinicError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderTarget {
    Blob,
    File { dir: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    Blob(PdfBlob),
    Saved(PathBuf),
}

/// PDF bytes plus a `data:` URL a webview can open directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfBlob {
    pub bytes: Vec<u8>,
    pub url: String,
}

impl PdfBlob {
    pub fn new(bytes: Vec<u8>) -> Self {
        let url = format!(
            "data:application/pdf;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&bytes)
        );
        Self { bytes, url }
    }
}

/// `prescription-<id>-<millis>.pdf`, with path separators in the id
/// replaced.
pub fn prescription_filename(prescription_id: &str, timestamp_millis: i64) -> String {
    let id: String = prescription_id
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
        .collect();
    format!("prescription-{id}-{timestamp_millis}.pdf")
}

/// Writes `bytes` into `dir` under a fresh name. An existing file with the
/// same name bumps the timestamp; nothing is ever overwritten.
pub fn save_unique(
    dir: &Path,
    prescription_id: &str,
    timestamp_millis: i64,
    bytes: &[u8],
) -> Result<PathBuf, ClinicError> {
    std::fs::create_dir_all(dir).map_err(|source| persistence_error(dir.to_path_buf(), source))?;

    let mut stamp = timestamp_millis;
    loop {
        let path = dir.join(prescription_filename(prescription_id, stamp));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return commit(path, file, bytes, |f| f.sync_all()),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => stamp += 1,
            Err(source) => return Err(persistence_error(path, source)),
        }
    }
}

/// Writes into a freshly created file. On failure the partial file is
/// removed before the error is returned.
fn commit<W: Write>(
    path: PathBuf,
    mut out: W,
    bytes: &[u8],
    sync: fn(&mut W) -> std::io::Result<()>,
) -> Result<PathBuf, ClinicError> {
    if let Err(source) = out.write_all(bytes).and_then(|()| sync(&mut out)) {
        drop(out);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "Could not remove partial PDF");
        }
        return Err(persistence_error(path, source));
    }
    tracing::info!(path = %path.display(), "PDF saved");
    Ok(path)
}

fn persistence_error(path: PathBuf, source: std::io::Error) -> ClinicError {
    tracing::error!(path = %path.display(), error = %source, "Error saving PDF");
    ClinicError::Persistence { path, source }
}
