//! 5×5 bingo grid and the sampler that fills it

use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{BingoError, BingoResult};

/// Rows and columns of a card
pub const GRID_SIZE: usize = 5;

/// Index of the reserved center row and column
pub const CENTER: usize = 2;

/// Number of phrases drawn per card (every cell except the center)
pub const CELLS_TO_FILL: usize = GRID_SIZE * GRID_SIZE - 1;

/// Content of the reserved center cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CenterCell {
    /// Leave the template untouched here
    Unfilled,
    /// Draw this text verbatim
    Placeholder(String),
}

/// A card layout: 24 phrases in row-major order around the center cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    phrases: Vec<String>,
    center: CenterCell,
}

fn is_center(row: usize, col: usize) -> bool {
    row == CENTER && col == CENTER
}

impl Grid {
    /// Draw 24 distinct phrases uniformly without replacement and lay them
    /// out row-major, skipping the center.
    pub fn sample<R: Rng + ?Sized>(
        phrases: &[String],
        rng: &mut R,
        center: &CenterCell,
    ) -> BingoResult<Self> {
        if phrases.len() < CELLS_TO_FILL {
            return Err(BingoError::InsufficientItems {
                required: CELLS_TO_FILL,
                actual: phrases.len(),
            });
        }

        let chosen = index::sample(rng, phrases.len(), CELLS_TO_FILL)
            .into_iter()
            .map(|i| phrases[i].clone())
            .collect();

        Ok(Self {
            phrases: chosen,
            center: center.clone(),
        })
    }

    /// Text of the cell at `row`/`col`, or `None` for an unfilled center
    /// or a position outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        if row >= GRID_SIZE || col >= GRID_SIZE {
            return None;
        }
        if is_center(row, col) {
            return match &self.center {
                CenterCell::Unfilled => None,
                CenterCell::Placeholder(text) => Some(text.as_str()),
            };
        }
        let flat = row * GRID_SIZE + col;
        let idx = if flat > CENTER * GRID_SIZE + CENTER { flat - 1 } else { flat };
        Some(self.phrases[idx].as_str())
    }

    /// All 25 cells as `(row, col, text)`, top row first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Option<&str>)> + '_ {
        (0..GRID_SIZE)
            .flat_map(|row| (0..GRID_SIZE).map(move |col| (row, col)))
            .map(move |(row, col)| (row, col, self.cell(row, col)))
    }

    /// The 24 drawn phrases in placement order
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn center(&self) -> &CenterCell {
        &self.center
    }

    /// Owned 5×5 copy, used for export
    pub fn rows(&self) -> Vec<Vec<Option<String>>> {
        (0..GRID_SIZE)
            .map(|row| {
                (0..GRID_SIZE)
                    .map(|col| self.cell(row, col).map(str::to_owned))
                    .collect()
            })
            .collect()
    }
}

/// Free-function form of [`Grid::sample`].
pub fn sample_grid<R: Rng + ?Sized>(
    phrases: &[String],
    rng: &mut R,
    center: &CenterCell,
) -> BingoResult<Grid> {
    Grid::sample(phrases, rng, center)
}
