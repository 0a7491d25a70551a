//! User actions around a finished prescription: preview-then-save and the
//! deferred print trigger.

use std::time::Duration;

use crate::error::ClinicError;
use crate::models::{GlobalSettings, PrescriptionRecord};
use crate::pdf::{generate_prescription_pdf, PdfBlob, RenderOutput, RenderTarget};

/// Pause before the print dialog so pending view updates land first.
pub const PRINT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// The platform's print dialog.
pub trait PrintDialog {
    fn print(&self) -> Result<(), ClinicError>;
}

/// Opens a preview for a PDF URL. Returns `false` when the platform blocks
/// the window.
pub trait PreviewWindow {
    fn open(&self, url: &str) -> bool;
}

pub async fn schedule_print<D: PrintDialog + ?Sized>(dialog: &D) -> Result<(), ClinicError> {
    tokio::time::sleep(PRINT_SETTLE_DELAY).await;
    dialog.print()
}

/// A prescription that was previewed successfully, with its PDF.
#[derive(Debug, Clone)]
pub struct PreviewedPrescription {
    pub record: PrescriptionRecord,
    pub pdf: PdfBlob,
}

/// Renders the prescription, opens the preview and hands the result to
/// `on_save`. A blocked preview is reported and nothing is saved.
pub fn view_and_print<W, F>(
    record: &PrescriptionRecord,
    settings: &GlobalSettings,
    window: &W,
    on_save: F,
) -> Result<(), ClinicError>
where
    W: PreviewWindow + ?Sized,
    F: FnOnce(PreviewedPrescription),
{
    let pdf = match generate_prescription_pdf(record, settings, &RenderTarget::Blob) {
        Ok(RenderOutput::Blob(blob)) => blob,
        Ok(RenderOutput::Saved(path)) => {
            return Err(ClinicError::Pdf(format!(
                "expected an in-memory PDF, got {}",
                path.display()
            )))
        }
        Err(e) => {
            tracing::error!(error = %e, "Error generating prescription PDF");
            return Err(e);
        }
    };

    if !window.open(&pdf.url) {
        return Err(ClinicError::PopupBlocked(
            "Please allow popups to view the prescription".into(),
        ));
    }

    on_save(PreviewedPrescription { record: record.clone(), pdf });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::time::Instant;

    struct Window {
        allow: bool,
        opened: RefCell<Vec<String>>,
    }

    impl PreviewWindow for Window {
        fn open(&self, url: &str) -> bool {
            self.opened.borrow_mut().push(url.to_string());
            self.allow
        }
    }

    struct Dialog(Cell<bool>);

    impl PrintDialog for Dialog {
        fn print(&self) -> Result<(), ClinicError> {
            self.0.set(true);
            Ok(())
        }
    }

    fn record() -> PrescriptionRecord {
        PrescriptionRecord {
            prescription_id: Some("RX-55".into()),
            patient_name: Some("Farhan".into()),
            ..Default::default()
        }
    }

    #[test]
    fn preview_then_save() {
        let window = Window { allow: true, opened: RefCell::new(Vec::new()) };
        let mut saved = None;
        view_and_print(&record(), &GlobalSettings::default(), &window, |p| saved = Some(p)).unwrap();

        let saved = saved.expect("record should be saved after preview");
        assert_eq!(saved.record.prescription_id.as_deref(), Some("RX-55"));
        assert_eq!(&saved.pdf.bytes[0..4], b"%PDF");
        assert_eq!(window.opened.borrow().as_slice(), [saved.pdf.url.clone()]);
    }

    #[test]
    fn blocked_preview_is_not_saved() {
        let window = Window { allow: false, opened: RefCell::new(Vec::new()) };
        let mut saved = false;
        let err = view_and_print(&record(), &GlobalSettings::default(), &window, |_| saved = true)
            .unwrap_err();

        assert!(!saved);
        assert!(err.is_advisory());
        assert_eq!(err.user_message(), "Please allow popups to view the prescription");
    }

    #[tokio::test]
    async fn print_waits_for_settle_delay() {
        let dialog = Dialog(Cell::new(false));
        let started = Instant::now();
        schedule_print(&dialog).await.unwrap();
        assert!(dialog.0.get());
        assert!(started.elapsed() >= PRINT_SETTLE_DELAY);
    }
}
