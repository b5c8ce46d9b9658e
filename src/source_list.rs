//! Phrase list loading
//!
//! Only the first column of each CSV row is used. Blank cells are skipped
//! and duplicates are removed while keeping the first occurrence.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};

use crate::error::{BingoError, BingoResult};

/// Trim entries, drop blanks and remove exact duplicates, preserving
/// first-seen order.
pub fn dedup_phrases<I>(rows: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    rows.into_iter()
        .map(|row| row.trim().to_string())
        .filter(|text| !text.is_empty())
        .filter(|text| seen.insert(text.clone()))
        .collect()
}

/// Read phrases from the first column of CSV data.
pub fn read_phrases<R: Read>(reader: R) -> BingoResult<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut first_column = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        if let Some(text) = record.get(0) {
            first_column.push(text.to_string());
        }
    }

    let rows = first_column.len();
    let phrases = dedup_phrases(first_column);
    debug!("Read {} rows, {} unique phrases", rows, phrases.len());
    Ok(phrases)
}

/// Load the phrase list from a CSV file.
pub fn load_phrases(path: &Path) -> BingoResult<Vec<String>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => BingoError::SourceNotFound(path.to_path_buf()),
        _ => BingoError::Io(e),
    })?;
    let phrases = read_phrases(file)?;
    info!("Loaded {} distinct phrases from {}", phrases.len(), path.display());
    Ok(phrases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn dedup_keeps_first_occurrence() {
        let rows = ["Cat", "", "Dog", "Cat", "  Bird  "].map(String::from);
        assert_eq!(dedup_phrases(rows), vec!["Cat", "Dog", "Bird"]);
    }

    #[test]
    fn dedup_is_case_sensitive() {
        let rows = ["cat", "Cat", "CAT", "cat "].map(String::from);
        assert_eq!(dedup_phrases(rows), vec!["cat", "Cat", "CAT"]);
    }

    #[test]
    fn only_first_column_is_read() {
        let data = "Cat,ignored\n,Dog\nDog,x,y\n\"  Bird  \"\nCat\n";
        let phrases = read_phrases(data.as_bytes()).unwrap();
        assert_eq!(phrases, vec!["Cat", "Dog", "Bird"]);
    }

    #[test]
    fn quoted_commas_stay_in_the_phrase() {
        let data = "\"Someone says \"\"hola\"\", loudly\",2\n";
        let phrases = read_phrases(data.as_bytes()).unwrap();
        assert_eq!(phrases, vec!["Someone says \"hola\", loudly"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let data = "\n\nA\n   \nB\n";
        assert_eq!(read_phrases(data.as_bytes()).unwrap(), vec!["A", "B"]);
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let err = load_phrases(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, BingoError::SourceNotFound(_)));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Llega tarde\nPide otra ronda\nLlega tarde").unwrap();
        let phrases = load_phrases(file.path()).unwrap();
        assert_eq!(phrases, vec!["Llega tarde", "Pide otra ronda"]);
    }
}
