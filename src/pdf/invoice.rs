//! Printed lab invoice.

use crate::invoice::totals::format_amount;
use crate::invoice::InvoiceView;

use super::canvas::{Canvas, FontWeight, Surface, LINE_ADVANCE};

const NAME_X: f32 = 15.0;
const PRICE_X: f32 = 160.0;
const TOTALS_LABEL_X: f32 = 120.0;

pub fn render_invoice<S: Surface>(view: &InvoiceView, canvas: &mut Canvas<S>) {
    if let Some(logo) = &view.logo {
        canvas.logo(logo, 15.0, 10.0, 20.0, 20.0);
    }

    canvas.set_font(16.0, FontWeight::Bold);
    canvas.text(&view.title, 40.0, 20.0);

    canvas.set_font(10.0, FontWeight::Normal);
    canvas.set_y(35.0);
    canvas.text_here(&format!("Prescription ID: {}", view.prescription_id), NAME_X);
    if let Some(id) = &view.invoice_id {
        canvas.text_here(&format!("Invoice: {id}"), 120.0);
    }
    canvas.skip(LINE_ADVANCE);
    canvas.text_here(&format!("Patient Name: {}", view.patient_name), NAME_X);
    canvas.skip(LINE_ADVANCE);
    canvas.text_here(&format!("Date: {}", view.date), NAME_X);

    let y = canvas.skip(6.0);
    canvas.line((15.0, y), (195.0, y));

    canvas.skip(LINE_ADVANCE);
    canvas.set_weight(FontWeight::Bold);
    canvas.text_here("Test Name", NAME_X);
    canvas.text_here("Price (Rs.)", PRICE_X);
    canvas.set_weight(FontWeight::Normal);

    for line in &view.lines {
        canvas.advance(LINE_ADVANCE);
        canvas.text_here(&line.test_name, NAME_X);
        canvas.text_here(&format_amount(line.price), PRICE_X);
    }

    canvas.advance(10.0);
    canvas.text_here("Subtotal:", TOTALS_LABEL_X);
    canvas.text_here(&format_amount(view.subtotal), PRICE_X);

    if let Some(amount) = view.discount_amount {
        canvas.advance(LINE_ADVANCE);
        canvas.text_here(&format!("Discount ({}%):", view.discount_percent), TOTALS_LABEL_X);
        canvas.text_here(&format!("-{}", format_amount(amount)), PRICE_X);
    }

    canvas.advance(LINE_ADVANCE);
    canvas.set_weight(FontWeight::Bold);
    canvas.text_here("Total:", TOTALS_LABEL_X);
    canvas.text_here(&format_amount(view.total), PRICE_X);
    canvas.set_weight(FontWeight::Normal);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{InvoiceHeader, InvoiceView};
    use crate::models::{DiagnosticTest, TestCatalog};
    use crate::pdf::canvas::recording::RecordingSurface;
    use crate::pdf::canvas::TOP_MARGIN;

    fn view(tests: &[&str], discount: f64) -> InvoiceView {
        let catalog = TestCatalog::new(vec![
            DiagnosticTest { name: "CBC".into(), price: 300.0 },
            DiagnosticTest { name: "LFT".into(), price: 200.0 },
        ]);
        let tests: Vec<String> = tests.iter().map(|t| t.to_string()).collect();
        InvoiceView::compute(
            InvoiceHeader {
                title: "Vijaya Labs".into(),
                logo: None,
                invoice_id: Some("INV42".into()),
                prescription_id: "RX-9".into(),
                patient_name: "Lakshmi".into(),
                date: "05/03/2024".into(),
            },
            &tests,
            discount,
            &catalog,
        )
    }

    fn draw(view: &InvoiceView) -> RecordingSurface {
        let mut canvas = Canvas::new(RecordingSurface::default());
        render_invoice(view, &mut canvas);
        canvas.into_surface()
    }

    #[test]
    fn header_and_rows() {
        let surface = draw(&view(&["CBC", "LFT"], 10.0));

        let (_, x, y, style) = surface.find("Vijaya Labs").unwrap();
        assert_eq!((x, y), (40.0, 20.0));
        assert_eq!(style.weight, FontWeight::Bold);
        assert!(surface.find("Invoice: INV42").is_some());
        assert!(surface.find("Patient Name: Lakshmi").is_some());

        let header_y = surface.find("Test Name").unwrap().2;
        assert_eq!(surface.find("CBC").unwrap().2, header_y + LINE_ADVANCE);
        assert_eq!(surface.find("300.00").unwrap().1, PRICE_X);
        assert_eq!(surface.find("LFT").unwrap().2, header_y + 2.0 * LINE_ADVANCE);
    }

    #[test]
    fn totals_block() {
        let surface = draw(&view(&["CBC", "LFT"], 10.0));
        let texts = surface.texts();
        let subtotal = texts.iter().position(|t| *t == "500.00").unwrap();
        let discount = texts.iter().position(|t| *t == "-50.00").unwrap();
        let total = texts.iter().position(|t| *t == "450.00").unwrap();
        assert!(subtotal < discount && discount < total);
        assert!(surface.find("Discount (10%):").is_some());
        assert_eq!(surface.find("450.00").unwrap().3.weight, FontWeight::Bold);
    }

    #[test]
    fn no_discount_line_without_discount() {
        let surface = draw(&view(&["CBC"], 0.0));
        assert!(!surface.texts().iter().any(|t| t.starts_with("Discount")));
        assert!(surface.find("Total:").is_some());
    }

    #[test]
    fn long_invoice_continues_on_next_page() {
        let names: Vec<String> = (0..40).map(|i| format!("Test {i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let surface = draw(&view(&refs, 0.0));

        assert!(surface.page_count() > 1);
        let (page, _, y, _) = surface.find("Test 39").unwrap();
        assert!(page >= 1);
        assert!(y >= TOP_MARGIN);
    }
}
