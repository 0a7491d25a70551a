//! `printpdf` backend for the page canvas.

use std::io::BufWriter;

use printpdf::image_crate::GenericImageView;
use printpdf::*;

use crate::error::ClinicError;

use super::canvas::{FontWeight, Surface, TextStyle, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

/// Images are embedded at this resolution before scaling to their box.
const IMAGE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;

pub struct PdfSurface {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfSurface {
    /// Starts an A4 document with one empty page.
    pub fn new(title: &str) -> Result<Self, ClinicError> {
        let (doc, page1, layer1) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ClinicError::Pdf(format!("PDF font error: {e}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ClinicError::Pdf(format!("PDF font error: {e}")))?;

        Ok(Self { doc, layer, regular, bold })
    }

    /// Serializes the document. Returns PDF bytes.
    pub fn finish(self) -> Result<Vec<u8>, ClinicError> {
        let mut buf = BufWriter::new(Vec::new());
        self.doc
            .save(&mut buf)
            .map_err(|e| ClinicError::Pdf(format!("PDF save error: {e}")))?;
        buf.into_inner()
            .map_err(|e| ClinicError::Pdf(format!("PDF buffer error: {e}")))
    }
}

/// Top-down template coordinate to PDF's bottom-up space.
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - y)
}

impl Surface for PdfSurface {
    fn text(&mut self, text: &str, style: TextStyle, x: f32, y: f32) {
        let font = match style.weight {
            FontWeight::Normal => &self.regular,
            FontWeight::Bold => &self.bold,
        };
        self.layer.use_text(text, style.size, Mm(x), flip(y), font);
    }

    fn line(&mut self, from: (f32, f32), to: (f32, f32)) {
        let line = Line {
            points: vec![
                (Point::new(Mm(from.0), flip(from.1)), false),
                (Point::new(Mm(to.0), flip(to.1)), false),
            ],
            is_closed: false,
        };
        self.layer.add_line(line);
    }

    fn image(
        &mut self,
        data: &[u8],
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> Result<(), ClinicError> {
        let decoded = image_crate::load_from_memory(data)
            .map_err(|e| ClinicError::Asset(format!("Cannot decode image: {e}")))?;
        let (px_w, px_h) = decoded.dimensions();
        if px_w == 0 || px_h == 0 {
            return Err(ClinicError::Asset("Image has no pixels".into()));
        }

        let natural_w = px_w as f32 * MM_PER_INCH / IMAGE_DPI;
        let natural_h = px_h as f32 * MM_PER_INCH / IMAGE_DPI;

        Image::from_dynamic_image(&decoded).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(flip(y + height)),
                scale_x: Some(width / natural_w),
                scale_y: Some(height / natural_h),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
    }
}
