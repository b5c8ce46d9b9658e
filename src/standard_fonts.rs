//! Metrics for the built-in (standard 14) PDF fonts
//!
//! Widths are taken from the Adobe AFM files, in 1/1000 em, indexed by
//! WinAnsi byte for the printable ASCII range. A few common Latin-1 and
//! CP1252 glyphs are listed separately; accented letters fall back to
//! their base letter.

use crate::winansi::decode_byte;

/// A built-in Type1 font that needs no embedding.
#[derive(Debug)]
pub struct StandardFont {
    /// PostScript name written as `/BaseFont`
    pub base_font: &'static str,
    /// Widths for bytes 0x20..=0x7E
    ascii_widths: &'static [u16; 95],
    /// Widths for glyphs outside ASCII that do not share a base letter width
    extra_widths: &'static [(char, u16)],
    /// AFM Ascender (positive)
    pub ascender: i16,
    /// AFM Descender (negative)
    pub descender: i16,
    missing_width: u16,
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

const COURIER_WIDTHS: [u16; 95] = [600; 95];

const HELVETICA_EXTRAS: [(char, u16); 22] = [
    ('\u{2026}', 1000), ('¿', 611), ('¡', 333), ('€', 556),
    ('\u{2018}', 222), ('\u{2019}', 222), ('\u{201C}', 333), ('\u{201D}', 333),
    ('–', 556), ('—', 1000), ('•', 350), ('°', 400),
    ('Æ', 1000), ('æ', 889), ('ß', 611), ('\u{A0}', 278),
    ('ì', 278), ('í', 278), ('î', 278), ('ï', 278),
    ('«', 556), ('»', 556),
];

const HELVETICA_BOLD_EXTRAS: [(char, u16); 22] = [
    ('\u{2026}', 1000), ('¿', 611), ('¡', 333), ('€', 556),
    ('\u{2018}', 278), ('\u{2019}', 278), ('\u{201C}', 500), ('\u{201D}', 500),
    ('–', 556), ('—', 1000), ('•', 350), ('°', 400),
    ('Æ', 1000), ('æ', 889), ('ß', 611), ('\u{A0}', 278),
    ('ì', 278), ('í', 278), ('î', 278), ('ï', 278),
    ('«', 556), ('»', 556),
];

const TIMES_ROMAN_EXTRAS: [(char, u16); 18] = [
    ('\u{2026}', 1000), ('¿', 444), ('¡', 333), ('€', 500),
    ('\u{2018}', 333), ('\u{2019}', 333), ('\u{201C}', 444), ('\u{201D}', 444),
    ('–', 500), ('—', 1000), ('•', 350), ('°', 400),
    ('Æ', 889), ('æ', 667), ('ß', 500), ('\u{A0}', 250),
    ('«', 500), ('»', 500),
];

pub static HELVETICA: StandardFont = StandardFont {
    base_font: "Helvetica",
    ..HELVETICA_SHARED
};

pub static HELVETICA_OBLIQUE: StandardFont = StandardFont {
    base_font: "Helvetica-Oblique",
    ..HELVETICA_SHARED
};

pub static HELVETICA_BOLD: StandardFont = StandardFont {
    base_font: "Helvetica-Bold",
    ..HELVETICA_BOLD_SHARED
};

pub static HELVETICA_BOLD_OBLIQUE: StandardFont = StandardFont {
    base_font: "Helvetica-BoldOblique",
    ..HELVETICA_BOLD_SHARED
};

pub static TIMES_ROMAN: StandardFont = StandardFont {
    base_font: "Times-Roman",
    ascii_widths: &TIMES_ROMAN_WIDTHS,
    extra_widths: &TIMES_ROMAN_EXTRAS,
    ascender: 683,
    descender: -217,
    missing_width: 500,
};

pub static COURIER: StandardFont = StandardFont {
    base_font: "Courier",
    ..COURIER_SHARED
};

pub static COURIER_BOLD: StandardFont = StandardFont {
    base_font: "Courier-Bold",
    ..COURIER_SHARED
};

pub static COURIER_OBLIQUE: StandardFont = StandardFont {
    base_font: "Courier-Oblique",
    ..COURIER_SHARED
};

pub static COURIER_BOLD_OBLIQUE: StandardFont = StandardFont {
    base_font: "Courier-BoldOblique",
    ..COURIER_SHARED
};

// Obliques share metrics with their upright face.
const HELVETICA_SHARED: StandardFont = StandardFont {
    base_font: "Helvetica",
    ascii_widths: &HELVETICA_WIDTHS,
    extra_widths: &HELVETICA_EXTRAS,
    ascender: 718,
    descender: -207,
    missing_width: 556,
};

const HELVETICA_BOLD_SHARED: StandardFont = StandardFont {
    base_font: "Helvetica-Bold",
    ascii_widths: &HELVETICA_BOLD_WIDTHS,
    extra_widths: &HELVETICA_BOLD_EXTRAS,
    ascender: 718,
    descender: -207,
    missing_width: 611,
};

const COURIER_SHARED: StandardFont = StandardFont {
    base_font: "Courier",
    ascii_widths: &COURIER_WIDTHS,
    extra_widths: &[],
    ascender: 629,
    descender: -157,
    missing_width: 600,
};

/// Look up a built-in font by name. Common aliases are accepted.
pub fn lookup(name: &str) -> Option<&'static StandardFont> {
    let font = match name {
        "Helvetica" | "Arial" => &HELVETICA,
        "Helvetica-Oblique" | "Arial-Italic" => &HELVETICA_OBLIQUE,
        "Helvetica-Bold" | "Arial-Bold" => &HELVETICA_BOLD,
        "Helvetica-BoldOblique" | "Arial-BoldItalic" => &HELVETICA_BOLD_OBLIQUE,
        "Times-Roman" | "Times" => &TIMES_ROMAN,
        "Courier" => &COURIER,
        "Courier-Bold" => &COURIER_BOLD,
        "Courier-Oblique" => &COURIER_OBLIQUE,
        "Courier-BoldOblique" => &COURIER_BOLD_OBLIQUE,
        _ => return None,
    };
    Some(font)
}

/// Strip the accent from a Latin-1 letter.
fn base_letter(ch: char) -> Option<char> {
    let base = match ch {
        'À'..='Å' => 'A',
        'Ç' => 'C',
        'È'..='Ë' => 'E',
        'Ì'..='Ï' => 'I',
        'Ð' => 'D',
        'Ñ' => 'N',
        'Ò'..='Ö' | 'Ø' => 'O',
        'Ù'..='Ü' => 'U',
        'Ý' | 'Ÿ' => 'Y',
        'Š' => 'S',
        'Ž' => 'Z',
        'à'..='å' => 'a',
        'ç' => 'c',
        'è'..='ë' => 'e',
        'ì'..='ï' => 'i',
        'ñ' => 'n',
        'ò'..='ö' | 'ø' => 'o',
        'ù'..='ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'š' => 's',
        'ž' => 'z',
        _ => return None,
    };
    Some(base)
}

impl StandardFont {
    /// Advance width of a WinAnsi byte, in 1/1000 em.
    pub fn byte_width(&self, byte: u8) -> u16 {
        if (0x20..=0x7E).contains(&byte) {
            return self.ascii_widths[(byte - 0x20) as usize];
        }
        let Some(ch) = decode_byte(byte) else {
            return self.missing_width;
        };
        if let Some(&(_, w)) = self.extra_widths.iter().find(|(c, _)| *c == ch) {
            return w;
        }
        match base_letter(ch) {
            Some(base) => self.ascii_widths[(base as u8 - 0x20) as usize],
            None => self.missing_width,
        }
    }
}
