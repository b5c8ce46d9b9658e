//! Bingo card generator
//!
//! Draws randomized 5×5 bingo cards from a phrase list and writes them as
//! text overlays on copies of a background template page, one page per
//! card, using lopdf for the document and pdf-writer for content streams.

mod canvas;
pub mod config;
pub mod error;
mod font_registry;
mod font_utils;
pub mod geometry;
pub mod grid;
pub mod manifest;
pub mod renderer;
pub mod source_list;
mod standard_fonts;
pub mod template;
pub mod text_layout;
pub mod types;
mod winansi;

pub use config::{BingoJob, CardOptions, CenterMode, FontSpec};
pub use error::{BingoError, BingoResult};
pub use font_registry::PdfFont;
pub use geometry::Margins;
pub use grid::{CenterCell, Grid};
pub use manifest::Manifest;
pub use renderer::{assemble, draw_grids, generate, render_overlay, CardDeck, GenerationReport};
pub use template::{CardDocument, Template};
pub use types::{Color, Rect};
