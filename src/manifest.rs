//! JSON export of the generated cards
//!
//! Lets organizers check a claimed bingo against the card that was
//! printed without reopening the PDF.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BingoResult;
use crate::renderer::CardDeck;

/// One card: its 1-based page number and 5×5 cell texts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardEntry {
    pub card: usize,
    /// Rows top to bottom; an unfilled center is `null`
    pub rows: Vec<Vec<Option<String>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub seed: u64,
    pub template: String,
    pub cards: Vec<CardEntry>,
}

impl Manifest {
    pub fn from_deck(deck: &CardDeck, template: &Path) -> Self {
        Self {
            seed: deck.seed,
            template: template.display().to_string(),
            cards: deck
                .grids
                .iter()
                .enumerate()
                .map(|(i, grid)| CardEntry {
                    card: i + 1,
                    rows: grid.rows(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> BingoResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
