//! PDF generation for prescriptions and lab invoices.

pub mod canvas;
pub mod invoice;
pub mod output;
pub mod prescription;
pub mod surface;

pub use canvas::{Canvas, FontWeight, Surface, TextStyle};
pub use output::{prescription_filename, save_unique, PdfBlob, RenderOutput, RenderTarget};
pub use surface::PdfSurface;

use base64::Engine;
use chrono::Local;

use crate::document::{self, RenderDocument};
use crate::error::ClinicError;
use crate::invoice::InvoiceView;
use crate::models::{GlobalSettings, PrescriptionRecord};

/// Decodes a base64 image payload, with or without a `data:` URL prefix.
pub fn decode_image_payload(payload: &str) -> Result<Vec<u8>, ClinicError> {
    let encoded = match payload.find("base64,") {
        Some(at) => &payload[at + "base64,".len()..],
        None => payload,
    };
    let encoded = encoded.trim();
    if encoded.is_empty() {
        return Err(ClinicError::Asset("Empty image payload".into()));
    }
    base64::engine::general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| ClinicError::Asset(format!("Invalid base64 image: {e}")))
}

/// Lays out a built prescription and returns the PDF bytes.
pub fn prescription_pdf_bytes(doc: &RenderDocument) -> Result<Vec<u8>, ClinicError> {
    let id = &doc.prescription.id;
    let surface = PdfSurface::new(&format!("Prescription {id}"))?;
    let mut canvas = Canvas::new(surface);
    prescription::render(doc, &mut canvas);
    let pages = canvas.pages();

    let bytes = canvas.into_surface().finish()?;
    tracing::info!(prescription_id = %id, pages, bytes = bytes.len(), "Prescription PDF generated");
    Ok(bytes)
}

/// Builds, renders and delivers a prescription PDF.
pub fn generate_prescription_pdf(
    record: &PrescriptionRecord,
    settings: &GlobalSettings,
    target: &RenderTarget,
) -> Result<RenderOutput, ClinicError> {
    let doc = document::build(record, settings);
    let bytes = prescription_pdf_bytes(&doc)?;

    match target {
        RenderTarget::Blob => Ok(RenderOutput::Blob(PdfBlob::new(bytes))),
        RenderTarget::File { dir } => {
            let stamp = Local::now().timestamp_millis();
            save_unique(dir, &doc.prescription.id, stamp, &bytes).map(RenderOutput::Saved)
        }
    }
}

/// Printed copy of a lab invoice.
pub fn invoice_pdf_bytes(view: &InvoiceView) -> Result<Vec<u8>, ClinicError> {
    let surface = PdfSurface::new(&view.title)?;
    let mut canvas = Canvas::new(surface);
    invoice::render_invoice(view, &mut canvas);
    let pages = canvas.pages();

    let bytes = canvas.into_surface().finish()?;
    tracing::info!(
        invoice_id = view.invoice_id.as_deref().unwrap_or("-"),
        pages,
        bytes = bytes.len(),
        "Invoice PDF generated"
    );
    Ok(bytes)
}
