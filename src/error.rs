//! Error types for bingo card generation
//!
//! Every failure is detected before the output document is written,
//! so a returned error always means "nothing was produced".

use std::path::PathBuf;

use thiserror::Error;

/// Custom error type for card generation
#[derive(Error, Debug)]
pub enum BingoError {
    #[error("Source not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Template PDF has no pages: {}", .0.display())]
    EmptyTemplate(PathBuf),

    #[error("Need at least {required} distinct items, got {actual}")]
    InsufficientItems { required: usize, actual: usize },

    #[error("Margins produce an invalid table area: {0}")]
    InvalidMargins(String),

    #[error("Cell padding must be a finite number, got {0}")]
    InvalidPadding(f64),

    #[error("Card count must be at least 1, got {0}")]
    InvalidCount(usize),

    #[error("Font error: {0}")]
    Font(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(String),
}

/// Result type alias for card generation
pub type BingoResult<T> = Result<T, BingoError>;

impl From<lopdf::Error> for BingoError {
    fn from(err: lopdf::Error) -> Self {
        BingoError::Pdf(err.to_string())
    }
}

impl From<serde_json::Error> for BingoError {
    fn from(err: serde_json::Error) -> Self {
        BingoError::Json(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_items_reports_both_counts() {
        let err = BingoError::InsufficientItems { required: 24, actual: 7 };
        assert_eq!(err.to_string(), "Need at least 24 distinct items, got 7");
    }

    #[test]
    fn source_not_found_names_the_path() {
        let err = BingoError::SourceNotFound(PathBuf::from("puntos.csv"));
        assert!(err.to_string().contains("puntos.csv"));
    }
}
