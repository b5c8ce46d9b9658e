//! TrueType font loading
//!
//! A TrueType font is embedded as a simple font with WinAnsiEncoding, so
//! all metrics needed for layout and for the PDF `/Widths` array are read
//! once here, indexed by WinAnsi byte and normalized to 1000 units/em.

use std::fs;
use std::path::Path;

use log::debug;
use ttf_parser::Face;

use crate::error::{BingoError, BingoResult};
use crate::winansi::decode_byte;

/// First and last WinAnsi codes written to the font's `/Widths` array.
pub const FIRST_CHAR: u8 = 32;
pub const LAST_CHAR: u8 = 255;

/// Parsed TrueType font plus the raw program for embedding.
#[derive(Debug, Clone)]
pub struct TrueTypeFont {
    /// PostScript-safe name used for `/BaseFont` and `/FontName`
    pub name: String,
    pub data: Vec<u8>,
    /// Advance widths in 1/1000 em for every WinAnsi byte
    pub widths: [u16; 256],
    pub ascender: i16,
    pub descender: i16,
    pub cap_height: i16,
    pub bbox: [i32; 4],
    pub italic_angle: f32,
}

/// Load TTF/OTF font from file path
pub fn load_font_file(path: &Path) -> BingoResult<Vec<u8>> {
    if !path.exists() {
        return Err(BingoError::SourceNotFound(path.to_path_buf()));
    }
    let data = fs::read(path)?;

    // Validate font using ttf-parser
    Face::parse(&data, 0)
        .map_err(|e| BingoError::Font(format!("Invalid font file {}: {}", path.display(), e)))?;

    Ok(data)
}

/// Turn a family name into something usable as a PDF name.
fn sanitize_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if cleaned.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        cleaned
    }
}

impl TrueTypeFont {
    pub fn load(path: &Path) -> BingoResult<Self> {
        let data = load_font_file(path)?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> BingoResult<Self> {
        let face = Face::parse(&data, 0)
            .map_err(|e| BingoError::Font(format!("Failed to parse TTF font: {}", e)))?;

        let units_per_em = face.units_per_em() as f32;
        let scale = 1000.0 / units_per_em;
        let to_pdf = |v: i16| (v as f32 * scale).round() as i16;

        // Prefer the PostScript name (ID 6), fall back to the family (ID 1).
        let raw_name = face
            .names()
            .into_iter()
            .filter(|name| name.name_id == 6 || name.name_id == 1)
            .min_by_key(|name| if name.name_id == 6 { 0 } else { 1 })
            .and_then(|name| name.to_string())
            .unwrap_or_default();
        let name = sanitize_name(&raw_name);

        let space_advance = face
            .glyph_index(' ')
            .and_then(|gid| face.glyph_hor_advance(gid))
            .unwrap_or(face.units_per_em() / 2);

        let mut widths = [0u16; 256];
        for (byte, slot) in widths.iter_mut().enumerate() {
            let advance = decode_byte(byte as u8)
                .and_then(|ch| face.glyph_index(ch))
                .and_then(|gid| face.glyph_hor_advance(gid))
                .unwrap_or(space_advance);
            *slot = (advance as f32 * scale).round().max(0.0) as u16;
        }

        let bbox = face.global_bounding_box();
        let ascender = to_pdf(face.ascender());
        let descender = to_pdf(face.descender());
        let cap_height = face.capital_height().map(to_pdf).unwrap_or(ascender);

        debug!(
            "Loaded TrueType font {} ({} bytes, ascent {}, descent {})",
            name,
            data.len(),
            ascender,
            descender
        );

        Ok(Self {
            name,
            widths,
            ascender,
            descender,
            cap_height,
            bbox: [
                (bbox.x_min as f32 * scale) as i32,
                (bbox.y_min as f32 * scale) as i32,
                (bbox.x_max as f32 * scale) as i32,
                (bbox.y_max as f32 * scale) as i32,
            ],
            italic_angle: face.italic_angle().unwrap_or(0.0),
            data,
        })
    }

    /// Widths for codes `FIRST_CHAR..=LAST_CHAR`, as written to `/Widths`.
    pub fn pdf_widths(&self) -> &[u16] {
        &self.widths[FIRST_CHAR as usize..=LAST_CHAR as usize]
    }
}
