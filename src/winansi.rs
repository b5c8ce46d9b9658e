//! WinAnsiEncoding (CP1252) support for simple PDF fonts
//!
//! Card text is written with simple (single-byte) fonts, so every string is
//! converted to WinAnsi bytes before it is measured or shown. Characters
//! outside the encoding become `?`.

/// Byte used for characters WinAnsiEncoding cannot represent.
pub const REPLACEMENT: u8 = b'?';

/// CP1252 code points for bytes 0x80..=0x9F. `None` marks undefined slots.
const HIGH_CONTROL_RANGE: [Option<char>; 32] = [
    Some('\u{20AC}'), // 0x80 €
    None,
    Some('\u{201A}'), // ‚
    Some('\u{0192}'), // ƒ
    Some('\u{201E}'), // „
    Some('\u{2026}'), // …
    Some('\u{2020}'), // †
    Some('\u{2021}'), // ‡
    Some('\u{02C6}'), // ˆ
    Some('\u{2030}'), // ‰
    Some('\u{0160}'), // Š
    Some('\u{2039}'), // ‹
    Some('\u{0152}'), // Œ
    None,
    Some('\u{017D}'), // Ž
    None,
    None, // 0x90
    Some('\u{2018}'), // ‘
    Some('\u{2019}'), // ’
    Some('\u{201C}'), // “
    Some('\u{201D}'), // ”
    Some('\u{2022}'), // •
    Some('\u{2013}'), // –
    Some('\u{2014}'), // —
    Some('\u{02DC}'), // ˜
    Some('\u{2122}'), // ™
    Some('\u{0161}'), // š
    Some('\u{203A}'), // ›
    Some('\u{0153}'), // œ
    None,
    Some('\u{017E}'), // ž
    Some('\u{0178}'), // Ÿ
];

/// Encode a single character, or `None` if it has no WinAnsi code.
pub fn encode_char(ch: char) -> Option<u8> {
    let cp = ch as u32;
    match cp {
        0x00..=0x7F => Some(cp as u8),
        0xA0..=0xFF => Some(cp as u8),
        _ => HIGH_CONTROL_RANGE
            .iter()
            .position(|slot| *slot == Some(ch))
            .map(|idx| 0x80 + idx as u8),
    }
}

/// Decode a WinAnsi byte back to its character.
pub fn decode_byte(byte: u8) -> Option<char> {
    match byte {
        0x00..=0x7F | 0xA0..=0xFF => Some(byte as char),
        _ => HIGH_CONTROL_RANGE[(byte - 0x80) as usize],
    }
}

/// Convert a Unicode string to WinAnsiEncoding bytes.
pub fn unicode_to_winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| encode_char(ch).unwrap_or(REPLACEMENT))
        .collect()
}

/// True if every character of `text` survives WinAnsi encoding.
pub fn is_encodable(text: &str) -> bool {
    text.chars().all(|ch| encode_char(ch).is_some())
}
