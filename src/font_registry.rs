//! Font resolution and registration of font resources in the output document
use std::path::Path;

use log::{info, warn};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use crate::error::BingoResult;
use crate::font_utils::{TrueTypeFont, FIRST_CHAR, LAST_CHAR};
use crate::standard_fonts::{self, StandardFont};
use crate::text_layout::TextMeasure;
use crate::winansi::unicode_to_winansi;

/// Resource name the overlay uses to select its font.
pub const OVERLAY_FONT_RESOURCE: &[u8] = b"FBingo";

/// The font used to draw card text
#[derive(Debug, Clone)]
pub enum PdfFont {
    Standard(&'static StandardFont),
    TrueType(Box<TrueTypeFont>),
}

impl PdfFont {
    /// Map a logical font name to a built-in font. Unknown names fall back
    /// to Helvetica with a warning.
    pub fn builtin(font_name: &str) -> Self {
        match standard_fonts::lookup(font_name) {
            Some(font) => PdfFont::Standard(font),
            None => {
                warn!("Unknown built-in font {:?}, falling back to Helvetica", font_name);
                PdfFont::Standard(&standard_fonts::HELVETICA)
            }
        }
    }

    /// Resolve the configured font: an embedded TrueType file wins over a
    /// built-in name.
    pub fn resolve(font_name: &str, font_file: Option<&Path>) -> BingoResult<Self> {
        match font_file {
            Some(path) => {
                let font = TrueTypeFont::load(path)?;
                info!("Embedding TrueType font {} from {}", font.name, path.display());
                Ok(PdfFont::TrueType(Box::new(font)))
            }
            None => Ok(Self::builtin(font_name)),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PdfFont::Standard(font) => font.base_font,
            PdfFont::TrueType(font) => &font.name,
        }
    }

    fn byte_width(&self, byte: u8) -> u16 {
        match self {
            PdfFont::Standard(font) => font.byte_width(byte),
            PdfFont::TrueType(font) => font.widths[byte as usize],
        }
    }

    fn ascender(&self) -> i16 {
        match self {
            PdfFont::Standard(font) => font.ascender,
            PdfFont::TrueType(font) => font.ascender,
        }
    }

    fn descender(&self) -> i16 {
        match self {
            PdfFont::Standard(font) => font.descender,
            PdfFont::TrueType(font) => font.descender,
        }
    }

    /// Write the font object(s) into `doc` and return the font dictionary id.
    pub fn register(&self, doc: &mut Document) -> ObjectId {
        match self {
            PdfFont::Standard(font) => doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.base_font,
                "Encoding" => "WinAnsiEncoding",
            }),
            PdfFont::TrueType(font) => register_truetype(doc, font),
        }
    }
}

/// Embed a TrueType program as a simple font with WinAnsiEncoding.
fn register_truetype(doc: &mut Document, font: &TrueTypeFont) -> ObjectId {
    let font_file = Stream::new(
        dictionary! { "Length1" => font.data.len() as i64 },
        font.data.clone(),
    );
    let font_file_id = doc.add_object(font_file);

    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => font.name.as_str(),
        // Nonsymbolic
        "Flags" => 32,
        "FontBBox" => font.bbox.iter().map(|v| Object::Integer(*v as i64)).collect::<Vec<_>>(),
        "ItalicAngle" => font.italic_angle,
        "Ascent" => font.ascender as i64,
        "Descent" => font.descender as i64,
        "CapHeight" => font.cap_height as i64,
        "StemV" => 80,
        "FontFile2" => font_file_id,
    });

    let widths: Vec<Object> = font
        .pdf_widths()
        .iter()
        .map(|w| Object::Integer(*w as i64))
        .collect();

    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "TrueType",
        "BaseFont" => font.name.as_str(),
        "FirstChar" => FIRST_CHAR as i64,
        "LastChar" => LAST_CHAR as i64,
        "Widths" => widths,
        "Encoding" => "WinAnsiEncoding",
        "FontDescriptor" => descriptor_id,
    })
}

impl TextMeasure for PdfFont {
    fn string_width(&self, text: &str, size: f64) -> f64 {
        let units: u32 = unicode_to_winansi(text)
            .into_iter()
            .map(|b| self.byte_width(b) as u32)
            .sum();
        units as f64 * size / 1000.0
    }

    fn ascent(&self, size: f64) -> f64 {
        self.ascender() as f64 * size / 1000.0
    }

    fn descent(&self, size: f64) -> f64 {
        self.descender() as f64 * size / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn helvetica_measurements() {
        let font = PdfFont::builtin("Helvetica");
        assert!((font.string_width("Hello", 10.0) - 22.78).abs() < 1e-9);
        assert!((font.ascent(9.0) - 6.462).abs() < 1e-9);
        assert!((font.descent(9.0) + 1.863).abs() < 1e-9);
    }

    #[test]
    fn unknown_builtin_falls_back_to_helvetica() {
        assert_eq!(PdfFont::builtin("NoSuchFont").name(), "Helvetica");
    }

    #[test]
    fn resolve_without_file_uses_builtin() {
        let font = PdfFont::resolve("Courier", None).unwrap();
        assert_eq!(font.name(), "Courier");
        assert!((font.string_width("abc", 10.0) - 18.0).abs() < 1e-9);
    }

    #[test]
    fn standard_font_registers_a_type1_dictionary() {
        let mut doc = Document::with_version("1.5");
        let id = PdfFont::builtin("Times-Roman").register(&mut doc);
        let dict = doc.get_dictionary(id).unwrap();
        assert_eq!(dict.get(b"Subtype").unwrap().as_name().unwrap(), b"Type1");
        assert_eq!(dict.get(b"BaseFont").unwrap().as_name().unwrap(), b"Times-Roman");
        assert_eq!(dict.get(b"Encoding").unwrap().as_name().unwrap(), b"WinAnsiEncoding");
    }
}
