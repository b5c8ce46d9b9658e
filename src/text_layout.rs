//! Text layout for bingo cells
//!
//! This module provides:
//! - Text measurement (`TextMeasure`)
//! - Greedy line breaking with a line limit
//! - Ellipsis truncation of an overflowing last line
//! - Vertical and horizontal centering of the line block inside a cell

use crate::types::Rect;

/// Maximum number of lines drawn in a single cell
pub const MAX_LINES: usize = 6;

/// Marker appended when a line has to be cut short
pub const ELLIPSIS: char = '\u{2026}';

/// Extra space between lines, as a fraction of the line height
const LINE_GAP_RATIO: f64 = 0.10;

/// Text measurement capability of a font
pub trait TextMeasure {
    /// Advance width of `text` at `size`, in points
    fn string_width(&self, text: &str, size: f64) -> f64;
    /// Distance from baseline to the top of the font box (positive)
    fn ascent(&self, size: f64) -> f64;
    /// Distance from baseline to the bottom of the font box (negative)
    fn descent(&self, size: f64) -> f64;
}

/// Vertical metrics used to stack lines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascent: f64,
    pub descent: f64,
}

impl FontMetrics {
    pub fn from_font(font: &dyn TextMeasure, size: f64) -> Self {
        Self {
            ascent: font.ascent(size),
            descent: font.descent(size),
        }
    }

    pub fn line_height(&self) -> f64 {
        self.ascent - self.descent
    }

    pub fn line_gap(&self) -> f64 {
        self.line_height() * LINE_GAP_RATIO
    }

    /// Height of a block of `lines` lines including the gaps between them
    pub fn block_height(&self, lines: usize) -> f64 {
        if lines == 0 {
            return self.line_height();
        }
        lines as f64 * self.line_height() + (lines - 1) as f64 * self.line_gap()
    }
}

/// A line ready to be drawn: `x` is the left edge, `baseline` the y of its baseline
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedLine {
    pub text: String,
    pub x: f64,
    pub baseline: f64,
    pub width: f64,
}

/// Line breaker for wrapping text
pub struct LineBreaker<'a> {
    font: &'a dyn TextMeasure,
    font_size: f64,
    max_width: f64,
    max_lines: usize,
}

impl<'a> LineBreaker<'a> {
    pub fn new(font: &'a dyn TextMeasure, font_size: f64, max_width: f64, max_lines: usize) -> Self {
        Self {
            font,
            font_size,
            max_width,
            max_lines,
        }
    }

    fn fits(&self, text: &str) -> bool {
        self.font.string_width(text, self.font_size) <= self.max_width
    }

    /// Greedy word wrap, then ellipsis-trim the last line if it still overflows.
    pub fn break_text(&self, text: &str) -> Vec<String> {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return vec![String::new()];
        }

        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        for word in words {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if self.fits(&candidate) {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
            if lines.len() >= self.max_lines {
                break;
            }
        }

        if lines.len() < self.max_lines && !current.is_empty() {
            lines.push(current);
        }

        if let Some(last) = lines.last_mut() {
            *last = self.truncate(last);
        }

        lines.truncate(self.max_lines);
        lines
    }

    /// Drop two characters and append an ellipsis until the line fits or a
    /// single character is left. Cuts may land mid-word.
    fn truncate(&self, line: &str) -> String {
        let mut chars: Vec<char> = line.chars().collect();
        while chars.len() > 1 && !self.fits(&chars.iter().collect::<String>()) {
            let keep = chars.len().saturating_sub(2);
            chars.truncate(keep);
            chars.push(ELLIPSIS);
        }
        chars.into_iter().collect()
    }
}

/// Wrap `text` into at most `max_lines` lines no wider than `max_width`.
pub fn wrap_text(
    text: &str,
    max_width: f64,
    font: &dyn TextMeasure,
    font_size: f64,
    max_lines: usize,
) -> Vec<String> {
    LineBreaker::new(font, font_size, max_width, max_lines).break_text(text)
}

/// Space available for text in a cell. Pathological padding falls back to
/// half the cell width.
pub fn usable_width(cell: Rect, padding: f64) -> f64 {
    let usable = cell.width - 2.0 * padding;
    if usable <= 1.0 {
        cell.width * 0.5
    } else {
        usable
    }
}

/// Wrap `text` for `cell` and position every line so the block is centered
/// vertically and each line is centered horizontally.
pub fn layout_cell(
    text: &str,
    cell: Rect,
    padding: f64,
    font: &dyn TextMeasure,
    font_size: f64,
    max_lines: usize,
) -> Vec<PositionedLine> {
    let lines = wrap_text(text, usable_width(cell, padding), font, font_size, max_lines);
    let metrics = FontMetrics::from_font(font, font_size);

    let block_top = cell.bottom() + (cell.height + metrics.block_height(lines.len())) / 2.0;
    let first_baseline = block_top - metrics.ascent;
    let step = metrics.line_height() + metrics.line_gap();
    let mid_x = cell.center_x();

    lines
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let width = font.string_width(&text, font_size);
            PositionedLine {
                x: mid_x - width / 2.0,
                baseline: first_baseline - i as f64 * step,
                width,
                text,
            }
        })
        .collect()
}
