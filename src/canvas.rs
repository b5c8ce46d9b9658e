//! Canvas-like wrapper over a pdf-writer content stream
//!
//! The overlay for a card is a plain content stream: it is later appended
//! to a copy of the template page, so the canvas only needs text drawing.

use pdf_writer::{Content, Name, Str};

use crate::font_registry::OVERLAY_FONT_RESOURCE;
use crate::types::Color;
use crate::winansi::unicode_to_winansi;

/// Font selection applied to every text object
#[derive(Clone, Copy)]
pub struct CanvasState {
    pub font_name: Name<'static>,
    pub font_size: f64,
}

impl Default for CanvasState {
    fn default() -> Self {
        Self {
            font_name: Name(OVERLAY_FONT_RESOURCE),
            font_size: 12.0,
        }
    }
}

/// Text overlay canvas for a single card page
pub struct OverlayCanvas {
    content: Content,
    state: CanvasState,
}

impl OverlayCanvas {
    pub fn new() -> Self {
        Self {
            content: Content::new(),
            state: CanvasState::default(),
        }
    }

    /// Finish the stream and return its bytes
    pub fn finish(self) -> Vec<u8> {
        self.content.finish()
    }

    // ===== Colors =====

    pub fn set_fill_color(&mut self, color: Color) {
        self.content
            .set_fill_rgb(color.r as f32, color.g as f32, color.b as f32);
    }

    // ===== Text =====

    pub fn set_font(&mut self, font_name: Name<'static>, size: f64) {
        self.state.font_name = font_name;
        self.state.font_size = size;
    }

    /// Draw `text` with its baseline starting at (`x`, `y`).
    pub fn draw_string(&mut self, x: f64, y: f64, text: &str) {
        if text.is_empty() {
            return;
        }
        let encoded = unicode_to_winansi(text);
        self.content.begin_text();
        self.content
            .set_font(self.state.font_name, self.state.font_size as f32);
        self.content.next_line(x as f32, y as f32);
        self.content.show(Str(&encoded));
        self.content.end_text();
    }
}

impl Default for OverlayCanvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn draws_text_with_the_selected_font() {
        let mut canvas = OverlayCanvas::new();
        canvas.set_font(Name(b"FBingo"), 9.0);
        canvas.draw_string(10.0, 20.0, "Hola");
        let out = as_text(&canvas.finish());
        assert!(out.contains("BT"));
        assert!(out.contains("/FBingo 9 Tf"));
        assert!(out.contains("10 20 Td"));
        assert!(out.contains("(Hola) Tj"));
        assert!(out.contains("ET"));
    }

    #[test]
    fn empty_strings_emit_nothing() {
        let mut canvas = OverlayCanvas::new();
        canvas.draw_string(0.0, 0.0, "");
        assert!(canvas.finish().is_empty());
    }

    #[test]
    fn non_ascii_is_winansi_encoded() {
        let mut canvas = OverlayCanvas::new();
        canvas.draw_string(0.0, 0.0, "¿Qué?");
        let bytes = canvas.finish();
        assert!(!bytes.windows(2).any(|w| w == [0xC3, 0xA9]));
        // pdf-writer may pick a hex string for non-ASCII bytes
        let lower = as_text(&bytes).to_lowercase();
        assert!(bytes.contains(&0xE9) || lower.contains("<bf5175e93f>"));
    }

    #[test]
    fn fill_color_is_emitted_before_text() {
        let mut canvas = OverlayCanvas::new();
        canvas.set_fill_color(Color::rgb(1.0, 0.0, 0.0));
        canvas.draw_string(5.0, 5.0, "x");
        let out = as_text(&canvas.finish());
        let color = out.find("1 0 0 rg").unwrap();
        assert!(color < out.find("BT").unwrap());
    }
}
