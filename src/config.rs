//! Render options and the end-to-end job description

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::geometry::Margins;
use crate::grid::CenterCell;
use crate::types::Color;

/// What happens to the center cell of every card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CenterMode {
    /// Leave the template untouched (it usually carries a logo)
    #[default]
    Keep,
    /// Write the placeholder text
    Free,
}

impl CenterMode {
    pub fn center_cell(self, free_text: &str) -> CenterCell {
        match self {
            CenterMode::Keep => CenterCell::Unfilled,
            CenterMode::Free => CenterCell::Placeholder(free_text.to_string()),
        }
    }
}

/// Font selection for the card text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// Built-in font name, used when `file` is not set
    pub name: String,
    /// TrueType font to embed instead of a built-in font
    pub file: Option<PathBuf>,
    /// Size in points
    pub size: f64,
    pub color: Color,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            name: "Helvetica".to_string(),
            file: None,
            size: 9.0,
            color: Color::black(),
        }
    }
}

/// Layout options shared by every card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardOptions {
    pub center_mode: CenterMode,
    pub free_text: String,
    pub margins: Margins,
    pub font: FontSpec,
    /// Cell padding in points
    pub padding: f64,
}

impl CardOptions {
    pub fn center_cell(&self) -> CenterCell {
        self.center_mode.center_cell(&self.free_text)
    }
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            center_mode: CenterMode::Keep,
            free_text: "FREE".to_string(),
            margins: Margins::default(),
            font: FontSpec::default(),
            padding: 6.0,
        }
    }
}

/// Everything needed for one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BingoJob {
    pub template: PathBuf,
    pub phrases: PathBuf,
    pub output: PathBuf,
    pub count: usize,
    /// Random seed; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Optional JSON export of the card contents
    pub manifest: Option<PathBuf>,
    pub options: CardOptions,
}

impl Default for BingoJob {
    fn default() -> Self {
        Self {
            template: PathBuf::from("aegeeleon-bingo-template.pdf"),
            phrases: PathBuf::from("puntos.csv"),
            output: PathBuf::from("bingos_aegee_leon.pdf"),
            count: 1,
            seed: None,
            manifest: None,
            options: CardOptions::default(),
        }
    }
}
