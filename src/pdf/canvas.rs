//! Fixed-coordinate page canvas.
//!
//! Coordinates are millimetres from the top-left corner of an A4 page, the
//! way the printed templates were measured. A [`Surface`] does the actual
//! drawing; the canvas owns the font state, the vertical cursor and the
//! overflow rule.

use crate::error::ClinicError;

use super::decode_image_payload;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Cursor advance between consecutive table rows.
pub const LINE_ADVANCE: f32 = 7.0;
/// A line whose cursor lands below this goes to a fresh page.
pub const BREAK_THRESHOLD: f32 = 270.0;
/// Cursor position of the first line on a continuation page.
pub const TOP_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self { size: 10.0, weight: FontWeight::Normal }
    }
}

/// Drawing backend.
pub trait Surface {
    fn text(&mut self, text: &str, style: TextStyle, x: f32, y: f32);
    fn line(&mut self, from: (f32, f32), to: (f32, f32));
    /// `y` is the top edge of the image.
    fn image(&mut self, data: &[u8], x: f32, y: f32, width: f32, height: f32)
        -> Result<(), ClinicError>;
    fn new_page(&mut self);
}

pub struct Canvas<S: Surface> {
    surface: S,
    style: TextStyle,
    y: f32,
    pages: usize,
}

impl<S: Surface> Canvas<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            style: TextStyle::default(),
            y: TOP_MARGIN,
            pages: 1,
        }
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.style.size = size;
    }

    pub fn set_weight(&mut self, weight: FontWeight) {
        self.style.weight = weight;
    }

    pub fn set_font(&mut self, size: f32, weight: FontWeight) {
        self.style = TextStyle { size, weight };
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn set_y(&mut self, y: f32) {
        self.y = y;
    }

    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Moves the cursor without the overflow check. Used inside the fixed
    /// header area.
    pub fn skip(&mut self, dy: f32) -> f32 {
        self.y += dy;
        self.y
    }

    /// Moves the cursor for the next line. If it lands past the threshold a
    /// page is added first and the cursor restarts at the top margin, so
    /// the line is written on the new page.
    pub fn advance(&mut self, dy: f32) -> f32 {
        self.y += dy;
        if self.y > BREAK_THRESHOLD {
            self.surface.new_page();
            self.pages += 1;
            self.y = TOP_MARGIN;
        }
        self.y
    }

    pub fn text(&mut self, text: &str, x: f32, y: f32) {
        self.surface.text(text, self.style, x, y);
    }

    /// Writes at the cursor.
    pub fn text_here(&mut self, text: &str, x: f32) {
        let y = self.y;
        self.text(text, x, y);
    }

    pub fn line(&mut self, from: (f32, f32), to: (f32, f32)) {
        self.surface.line(from, to);
    }

    /// Places a base64 logo. A bad payload only costs the logo.
    pub fn logo(&mut self, payload: &str, x: f32, y: f32, width: f32, height: f32) -> bool {
        let placed = decode_image_payload(payload)
            .and_then(|data| self.surface.image(&data, x, y, width, height));
        match placed {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Error adding logo, continuing without it");
                false
            }
        }
    }

    pub fn into_surface(self) -> S {
        self.surface
    }
}
