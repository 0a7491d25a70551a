//! Printed prescription template.

use crate::document::RenderDocument;

use super::canvas::{Canvas, FontWeight, Surface, LINE_ADVANCE};

// Columns of the medicine table.
const MED_COLUMNS: [(&str, f32); 7] = [
    ("#", 15.0),
    ("Category", 25.0),
    ("Medicine", 45.0),
    ("Dosage", 105.0),
    ("Interval", 130.0),
    ("Duration", 160.0),
    ("Instruction", 185.0),
];

/// Every tablet is printed under this category.
const MED_CATEGORY: &str = "Tab";

const LABEL_X: f32 = 15.0;
const VALUE_X: f32 = 60.0;
const RIGHT_LABEL_X: f32 = 110.0;
const RIGHT_VALUE_X: f32 = 160.0;

/// Lays the document out on `canvas`, starting on its current page.
pub fn render<S: Surface>(doc: &RenderDocument, canvas: &mut Canvas<S>) {
    let rx = &doc.prescription;
    let patient = &rx.patient;

    if let Some(logo) = &doc.logo {
        canvas.logo(logo, 15.0, 10.0, 30.0, 30.0);
    }

    // Clinic, left column
    canvas.set_font(16.0, FontWeight::Bold);
    canvas.text(&doc.clinic.name, 50.0, 20.0);
    canvas.set_font(10.0, FontWeight::Normal);
    canvas.text(&doc.clinic.address, 50.0, 25.0);
    canvas.text(&doc.clinic.location, 50.0, 30.0);
    canvas.text(&doc.clinic.phone, 50.0, 35.0);
    canvas.text(&doc.clinic.website, 50.0, 40.0);

    // Doctor, right column
    canvas.set_font(12.0, FontWeight::Bold);
    canvas.text(&doc.doctor.name, 140.0, 20.0);
    canvas.set_font(10.0, FontWeight::Normal);
    canvas.text(&doc.doctor.qualifications, 140.0, 25.0);
    canvas.text(&doc.doctor.specialization, 140.0, 30.0);
    canvas.text(&doc.doctor.reg_no, 140.0, 35.0);

    canvas.line((15.0, 45.0), (195.0, 45.0));

    canvas.set_font_size(10.0);
    canvas.text(&format!("Prescription {}", rx.id), 15.0, 55.0);
    canvas.text(&format!("Date : {}", rx.date), 140.0, 55.0);

    // Patient details
    canvas.set_y(65.0);
    detail_row(canvas, ("OPD ID", &rx.id), Some(("OPD Visit ID", &rx.visit_id)));
    canvas.skip(LINE_ADVANCE);
    detail_row(canvas, ("Patient Name", &patient.name), Some(("Age", &patient.age)));
    canvas.skip(LINE_ADVANCE);
    let weight = format!("{} kg", patient.weight);
    detail_row(canvas, ("Gender", &patient.gender), Some(("Weight", &weight)));
    canvas.skip(LINE_ADVANCE);
    detail_row(canvas, ("BP", &patient.bp), Some(("Temperature", &patient.temperature)));
    canvas.skip(LINE_ADVANCE);
    detail_row(canvas, ("Phone", &patient.phone), Some(("Allergies", &patient.allergies)));
    canvas.skip(LINE_ADVANCE);
    detail_row(canvas, ("Consultant Doctor", &doc.doctor.name), None);

    // Symptoms
    let y = canvas.skip(15.0);
    canvas.set_weight(FontWeight::Bold);
    canvas.text("Symptoms:", 15.0, y);
    canvas.set_weight(FontWeight::Normal);
    canvas.text(&rx.symptoms, 25.0, y + LINE_ADVANCE);

    // Medicines
    canvas.skip(25.0);
    canvas.set_weight(FontWeight::Bold);
    canvas.text_here("Medicines", 15.0);

    canvas.skip(LINE_ADVANCE);
    canvas.set_font_size(9.0);
    for (header, x) in MED_COLUMNS {
        canvas.text_here(header, x);
    }

    canvas.set_weight(FontWeight::Normal);
    for (index, med) in rx.medications.iter().enumerate() {
        canvas.advance(LINE_ADVANCE);
        let row = [
            (index + 1).to_string(),
            MED_CATEGORY.to_string(),
            med.name.clone(),
            med.dosage.clone(),
            med.interval.clone(),
            med.duration.clone(),
            med.instructions.clone(),
        ];
        for (value, (_, x)) in row.iter().zip(MED_COLUMNS) {
            canvas.text_here(value, x);
        }
    }

    if !rx.lab_tests.is_empty() {
        canvas.advance(15.0);
        canvas.set_weight(FontWeight::Bold);
        canvas.text_here("Pathology Test", 15.0);
        canvas.set_weight(FontWeight::Normal);
        for (index, test) in rx.lab_tests.iter().enumerate() {
            canvas.advance(LINE_ADVANCE);
            canvas.text_here(&format!("{}. {}", index + 1, test), 15.0);
        }
    }

    if !rx.advice.is_empty() {
        canvas.advance(15.0);
        canvas.set_weight(FontWeight::Normal);
        canvas.text_here(&rx.advice, 15.0);
    }
}

/// One row of the two-column patient block at the cursor.
fn detail_row<S: Surface>(canvas: &mut Canvas<S>, left: (&str, &str), right: Option<(&str, &str)>) {
    canvas.text_here(left.0, LABEL_X);
    canvas.text_here(&format!(": {}", left.1), VALUE_X);
    if let Some((label, value)) = right {
        canvas.text_here(label, RIGHT_LABEL_X);
        canvas.text_here(&format!(": {value}"), RIGHT_VALUE_X);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::build_at;
    use crate::models::{GlobalSettings, Medication, PrescriptionRecord};
    use crate::pdf::canvas::recording::RecordingSurface;
    use crate::pdf::canvas::{BREAK_THRESHOLD, TOP_MARGIN};
    use chrono::{Local, TimeZone};

    fn record_with(meds: usize, tests: &[&str], advice: &str) -> PrescriptionRecord {
        PrescriptionRecord {
            prescription_id: Some("RX-7".into()),
            visit_id: Some("V-3".into()),
            patient_name: Some("Sunita Reddy".into()),
            age: Some("34".into()),
            gender: Some("Female".into()),
            symptoms: Some("Cough and cold".into()),
            medications: (0..meds)
                .map(|i| Medication {
                    name: format!("Med {}", i + 1),
                    dosage: "1-0-1".into(),
                    interval: "Daily".into(),
                    duration: "5 days".into(),
                    instructions: "After food".into(),
                })
                .collect(),
            lab_tests: tests.iter().map(|t| (*t).into()).collect(),
            advice: Some(advice.to_string()),
            ..Default::default()
        }
    }

    fn draw(record: &PrescriptionRecord) -> RecordingSurface {
        let now = Local.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap();
        let doc = build_at(record, &GlobalSettings::default(), now);
        let mut canvas = Canvas::new(RecordingSurface::default());
        render(&doc, &mut canvas);
        let pages = canvas.pages();
        let surface = canvas.into_surface();
        assert_eq!(pages, surface.page_count());
        surface
    }

    #[test]
    fn header_layout() {
        let surface = draw(&record_with(1, &[], ""));

        let (page, x, y, style) = surface.find("Suguna Clinic").unwrap();
        assert_eq!((page, x, y), (0, 50.0, 20.0));
        assert_eq!(style.size, 16.0);
        assert_eq!(style.weight, FontWeight::Bold);

        assert_eq!(surface.find("Dr. Ram Kumar").map(|f| (f.1, f.2)), Some((140.0, 20.0)));
        assert_eq!(surface.find("Website: sugunaclinic.com").map(|f| f.2), Some(40.0));
        assert_eq!(surface.find("Regd No: 54371").map(|f| (f.1, f.2)), Some((140.0, 35.0)));
        assert_eq!(surface.find("Prescription RX-7").map(|f| (f.1, f.2)), Some((15.0, 55.0)));
        assert_eq!(surface.find("Date : 15/07/2024").map(|f| (f.1, f.2)), Some((140.0, 55.0)));
    }

    #[test]
    fn patient_block_rows() {
        let surface = draw(&record_with(0, &[], ""));
        assert_eq!(surface.find("OPD ID").map(|f| f.2), Some(65.0));
        assert_eq!(surface.find(": V-3").map(|f| (f.1, f.2)), Some((160.0, 65.0)));
        assert_eq!(surface.find(": Sunita Reddy").map(|f| (f.1, f.2)), Some((60.0, 72.0)));
        assert_eq!(surface.find(": 34").map(|f| (f.1, f.2)), Some((160.0, 72.0)));
        assert_eq!(surface.find(": Female").map(|f| f.2), Some(79.0));
        assert_eq!(surface.find(": Not Provided").map(|f| f.2), Some(93.0));
        assert_eq!(surface.find("Consultant Doctor").map(|f| f.2), Some(100.0));
        assert_eq!(surface.find(": Dr. Ram Kumar").map(|f| f.1), Some(60.0));
        assert_eq!(surface.find(": ").map(|f| f.1), Some(60.0));
        assert_eq!(surface.find(":  kg").map(|f| f.1), Some(160.0));
    }

    #[test]
    fn symptoms_and_medicine_table() {
        let surface = draw(&record_with(2, &[], ""));
        assert_eq!(surface.find("Symptoms:").map(|f| f.2), Some(115.0));
        assert_eq!(surface.find("Cough and cold").map(|f| (f.1, f.2)), Some((25.0, 122.0)));
        assert_eq!(surface.find("Medicines").map(|f| f.2), Some(140.0));

        let (_, _, header_y, header_style) = surface.find("Instruction").unwrap();
        assert_eq!(header_y, 147.0);
        assert_eq!(header_style.size, 9.0);
        assert_eq!(header_style.weight, FontWeight::Bold);

        let (_, x, y, style) = surface.find("Med 1").unwrap();
        assert_eq!((x, y), (45.0, 154.0));
        assert_eq!(style.weight, FontWeight::Normal);
        assert_eq!(surface.find("Med 2").map(|f| f.2), Some(161.0));

        let row_texts: Vec<&str> = surface
            .texts()
            .into_iter()
            .skip_while(|t| *t != "Instruction")
            .skip(1)
            .take(7)
            .collect();
        assert_eq!(row_texts, vec!["1", "Tab", "Med 1", "1-0-1", "Daily", "5 days", "After food"]);
    }

    #[test]
    fn seventeen_rows_fit_the_first_page() {
        let surface = draw(&record_with(17, &[], ""));
        assert_eq!(surface.page_count(), 1);
        let (_, _, y, _) = surface.find("Med 17").unwrap();
        assert!(y <= BREAK_THRESHOLD);
    }

    #[test]
    fn crossing_row_lands_on_new_page() {
        let surface = draw(&record_with(18, &[], ""));
        assert_eq!(surface.page_count(), 2);
        assert_eq!(surface.find("Med 17").map(|f| f.0), Some(0));
        let (page, _, y, _) = surface.find("Med 18").unwrap();
        assert_eq!((page, y), (1, TOP_MARGIN));
    }

    #[test]
    fn continuation_pages_hold_thirty_six_rows() {
        assert_eq!(draw(&record_with(17 + 36, &[], "")).page_count(), 2);
        let surface = draw(&record_with(17 + 36 + 1, &[], ""));
        assert_eq!(surface.page_count(), 3);
        assert_eq!(surface.find("Med 54").map(|f| (f.0, f.2)), Some((2, TOP_MARGIN)));
    }

    #[test]
    fn lab_tests_numbered_after_medicines() {
        let surface = draw(&record_with(1, &["CBC", "LFT"], ""));
        let (_, _, heading_y, style) = surface.find("Pathology Test").unwrap();
        assert_eq!(heading_y, 154.0 + 15.0);
        assert_eq!(style.weight, FontWeight::Bold);
        assert_eq!(surface.find("1. CBC").map(|f| f.2), Some(heading_y + 7.0));
        assert_eq!(surface.find("2. LFT").map(|f| f.2), Some(heading_y + 14.0));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let surface = draw(&record_with(1, &[], ""));
        assert!(surface.find("Pathology Test").is_none());
        let texts = surface.texts();
        assert_eq!(texts.last(), Some(&"After food"));
    }

    #[test]
    fn advice_is_last() {
        let surface = draw(&record_with(1, &["CBC"], "Drink plenty of water"));
        let (_, x, y, _) = surface.find("Drink plenty of water").unwrap();
        assert_eq!(x, 15.0);
        assert_eq!(y, surface.find("1. CBC").unwrap().2 + 15.0);
        assert_eq!(surface.texts().last(), Some(&"Drink plenty of water"));
    }

    #[test]
    fn long_lab_list_breaks_pages() {
        let tests: Vec<String> = (1..=40).map(|i| format!("Test {i}")).collect();
        let refs: Vec<&str> = tests.iter().map(String::as_str).collect();
        let surface = draw(&record_with(0, &refs, ""));
        assert_eq!(surface.page_count(), 2);
        let (page, _, y, _) = surface.find("1. Test 1").unwrap();
        assert_eq!(page, 0);
        assert!(y <= BREAK_THRESHOLD);
    }

    #[test]
    fn logo_drawn_first_when_configured() {
        let now = Local.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap();
        let settings = GlobalSettings {
            clinic_logo: Some("data:image/png;base64,aGVsbG8=".into()),
            ..Default::default()
        };
        let doc = build_at(&record_with(0, &[], ""), &settings, now);
        let mut canvas = Canvas::new(RecordingSurface::default());
        render(&doc, &mut canvas);
        let surface = canvas.into_surface();
        assert_eq!(surface.images(), 1);
        assert!(matches!(
            surface.ops.first(),
            Some(crate::pdf::canvas::recording::Op::Image { x, y, .. }) if *x == 15.0 && *y == 10.0
        ));
    }

    #[test]
    fn unusable_logo_does_not_stop_rendering() {
        let now = Local.with_ymd_and_hms(2024, 7, 15, 9, 0, 0).unwrap();
        let settings = GlobalSettings {
            clinic_logo: Some("data:image/png;base64,aGVsbG8=".into()),
            ..Default::default()
        };
        let doc = build_at(&record_with(1, &[], ""), &settings, now);
        let mut canvas = Canvas::new(RecordingSurface { reject_images: true, ..Default::default() });
        render(&doc, &mut canvas);
        let surface = canvas.into_surface();
        assert_eq!(surface.images(), 0);
        assert!(surface.find("Med 1").is_some());
    }
}
