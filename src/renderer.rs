//! Card generation pipeline
//!
//! ## Data Flow
//!
//! ```text
//! phrase CSV → source_list → grid sampler → text_layout → overlay stream
//!                                                              ↓
//! template PDF → template::Template ──────────────→ template::CardDocument → PDF
//! ```
//!
//! Every grid is drawn from the RNG before the first overlay is rendered,
//! so the layout code can never disturb the random stream and a seed always
//! reproduces the same deck.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use pdf_writer::Name;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::NamedTempFile;

use crate::canvas::OverlayCanvas;
use crate::config::{BingoJob, CardOptions};
use crate::error::{BingoError, BingoResult};
use crate::font_registry::{PdfFont, OVERLAY_FONT_RESOURCE};
use crate::geometry::{cell_rect, table_rect};
use crate::grid::{CenterCell, Grid, CELLS_TO_FILL};
use crate::manifest::Manifest;
use crate::source_list::load_phrases;
use crate::template::{CardDocument, Template};
use crate::text_layout::{layout_cell, MAX_LINES};
use crate::types::Rect;
use crate::winansi::is_encodable;

/// A finished, serialized set of cards
#[derive(Debug, Clone)]
pub struct CardDeck {
    /// Complete PDF document, one page per grid
    pub pdf: Vec<u8>,
    /// Grids in page order
    pub grids: Vec<Grid>,
    pub seed: u64,
}

/// Outcome of [`generate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output: PathBuf,
    pub pages: usize,
    pub seed: u64,
}

/// Text-only content stream for one card.
///
/// An unfilled center cell is skipped so the template shows through.
pub fn render_overlay(
    grid: &Grid,
    page_box: Rect,
    options: &CardOptions,
    font: &PdfFont,
) -> BingoResult<Vec<u8>> {
    let table = table_rect(page_box, &options.margins)?;
    let font_size = options.font.size;

    let mut canvas = OverlayCanvas::new();
    canvas.set_fill_color(options.font.color);
    canvas.set_font(Name(OVERLAY_FONT_RESOURCE), font_size);

    for (row, col, text) in grid.cells() {
        let Some(text) = text else {
            continue;
        };
        let cell = cell_rect(table, row, col);
        for line in layout_cell(text, cell, options.padding, font, font_size, MAX_LINES) {
            canvas.draw_string(line.x, line.baseline, &line.text);
        }
    }

    Ok(canvas.finish())
}

/// Draw `count` grids in sequence from one RNG.
pub fn draw_grids<R: Rng + ?Sized>(
    phrases: &[String],
    count: usize,
    rng: &mut R,
    center: &CenterCell,
) -> BingoResult<Vec<Grid>> {
    (0..count)
        .map(|_| Grid::sample(phrases, rng, center))
        .collect()
}

fn validate_options(options: &CardOptions) -> BingoResult<()> {
    options.margins.validate()?;
    let size = options.font.size;
    if !size.is_finite() || size <= 0.0 {
        return Err(BingoError::Font(format!("font size must be positive, got {}", size)));
    }
    // Negative padding only widens the text area.
    if !options.padding.is_finite() {
        return Err(BingoError::InvalidPadding(options.padding));
    }
    Ok(())
}

/// Build `count` cards over `template` and serialize the document.
pub fn assemble(
    template: Template,
    phrases: &[String],
    count: usize,
    seed: u64,
    options: &CardOptions,
    font: &PdfFont,
) -> BingoResult<CardDeck> {
    if count == 0 {
        return Err(BingoError::InvalidCount(count));
    }
    validate_options(options)?;
    let page_box = template.page_box();
    table_rect(page_box, &options.margins)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let grids = draw_grids(phrases, count, &mut rng, &options.center_cell())?;

    let mut document = CardDocument::new(template, font)?;
    for (i, grid) in grids.iter().enumerate() {
        let overlay = render_overlay(grid, page_box, options, font)?;
        debug!("Card {}: overlay stream of {} bytes", i + 1, overlay.len());
        document.push_card(&overlay);
    }

    let pdf = document.finish()?;
    info!(
        "PDF generated: {} cards, {} bytes ({:.2} MB)",
        grids.len(),
        pdf.len(),
        pdf.len() as f64 / (1024.0 * 1024.0)
    );

    Ok(CardDeck { pdf, grids, seed })
}

/// Write `bytes` to a temporary file next to `target`.
fn stage(target: &Path, bytes: &[u8]) -> BingoResult<NamedTempFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

/// Move every staged file onto its target. Targets already moved are
/// removed again if a later one fails.
fn publish(staged: Vec<(NamedTempFile, &Path)>) -> BingoResult<()> {
    let mut published: Vec<&Path> = Vec::with_capacity(staged.len());
    for (file, target) in staged {
        if let Err(err) = file.persist(target) {
            for done in published {
                let _ = fs::remove_file(done);
            }
            return Err(BingoError::Io(err.error));
        }
        published.push(target);
    }
    Ok(())
}

/// Run a whole job: load inputs, build the deck and write the output.
///
/// Nothing is written unless every card was generated.
pub fn generate(job: &BingoJob) -> BingoResult<GenerationReport> {
    if job.count == 0 {
        return Err(BingoError::InvalidCount(job.count));
    }
    for path in [&job.template, &job.phrases] {
        if !path.exists() {
            return Err(BingoError::SourceNotFound(path.clone()));
        }
    }

    let phrases = load_phrases(&job.phrases)?;
    if phrases.len() < CELLS_TO_FILL {
        return Err(BingoError::InsufficientItems {
            required: CELLS_TO_FILL,
            actual: phrases.len(),
        });
    }

    for phrase in phrases.iter().filter(|p| !is_encodable(p)) {
        warn!("{:?} has characters outside WinAnsi, they will print as '?'", phrase);
    }

    let template = Template::load(&job.template)?;
    let font = PdfFont::resolve(&job.options.font.name, job.options.font.file.as_deref())?;

    let seed = match job.seed {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            warn!("No seed given, using {} (pass --seed {} to repeat this run)", seed, seed);
            seed
        }
    };

    let deck = assemble(template, &phrases, job.count, seed, &job.options, &font)?;

    let mut staged = vec![(stage(&job.output, &deck.pdf)?, job.output.as_path())];
    if let Some(path) = &job.manifest {
        let json = Manifest::from_deck(&deck, &job.template).to_json()?;
        staged.push((stage(path, json.as_bytes())?, path.as_path()));
    }
    publish(staged)?;
    info!("PDF saved to: {}", job.output.display());
    if let Some(path) = &job.manifest {
        info!("Manifest saved to: {}", path.display());
    }

    Ok(GenerationReport {
        output: job.output.clone(),
        pages: deck.grids.len(),
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CenterMode;
    use crate::geometry::Margins;
    use crate::template::tests::template_pdf;
    use lopdf::Document;
    use std::path::Path;

    fn phrases(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Frase {i}")).collect()
    }

    fn template() -> Template {
        let doc = Document::load_mem(&template_pdf(1, 595.0, 842.0)).unwrap();
        Template::from_document(doc, Path::new("template.pdf")).unwrap()
    }

    fn helvetica() -> PdfFont {
        PdfFont::builtin("Helvetica")
    }

    fn grid(center: CenterCell) -> Grid {
        Grid::sample(&phrases(30), &mut StdRng::seed_from_u64(9), &center).unwrap()
    }

    fn text_objects(stream: &[u8]) -> usize {
        String::from_utf8_lossy(stream).matches("BT").count()
    }

    #[test]
    fn keep_center_draws_only_24_cells() {
        let a4 = Rect::new(0.0, 0.0, 595.0, 842.0);
        let overlay =
            render_overlay(&grid(CenterCell::Unfilled), a4, &CardOptions::default(), &helvetica())
                .unwrap();
        // Short phrases fit on one line each.
        assert_eq!(text_objects(&overlay), 24);
    }

    #[test]
    fn free_center_draws_the_placeholder() {
        let a4 = Rect::new(0.0, 0.0, 595.0, 842.0);
        let options = CardOptions {
            center_mode: CenterMode::Free,
            free_text: "LIBRE".to_string(),
            ..CardOptions::default()
        };
        let overlay = render_overlay(&grid(options.center_cell()), a4, &options, &helvetica())
            .unwrap();
        assert_eq!(text_objects(&overlay), 25);
        assert!(String::from_utf8_lossy(&overlay).contains("(LIBRE) Tj"));
    }

    #[test]
    fn overlay_rejects_bad_margins() {
        let a4 = Rect::new(0.0, 0.0, 595.0, 842.0);
        let options = CardOptions {
            margins: Margins::new(0.6, 0.5, 0.1, 0.1),
            ..CardOptions::default()
        };
        let err = render_overlay(&grid(CenterCell::Unfilled), a4, &options, &helvetica())
            .unwrap_err();
        assert!(matches!(err, BingoError::InvalidMargins(_)));
    }

    #[test]
    fn grids_are_reproducible() {
        let list = phrases(60);
        let a = draw_grids(&list, 5, &mut StdRng::seed_from_u64(123), &CenterCell::Unfilled)
            .unwrap();
        let b = draw_grids(&list, 5, &mut StdRng::seed_from_u64(123), &CenterCell::Unfilled)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn assemble_produces_one_page_per_card() {
        let deck = assemble(
            template(),
            &phrases(40),
            3,
            42,
            &CardOptions::default(),
            &helvetica(),
        )
        .unwrap();
        assert_eq!(deck.grids.len(), 3);
        assert_eq!(deck.seed, 42);
        let out = Document::load_mem(&deck.pdf).unwrap();
        assert_eq!(out.get_pages().len(), 3);
    }

    #[test]
    fn assemble_rejects_zero_cards() {
        let err = assemble(template(), &phrases(40), 0, 1, &CardOptions::default(), &helvetica())
            .unwrap_err();
        assert!(matches!(err, BingoError::InvalidCount(0)));
    }

    #[test]
    fn assemble_rejects_non_positive_font_size() {
        let mut options = CardOptions::default();
        options.font.size = 0.0;
        let err = assemble(template(), &phrases(40), 1, 1, &options, &helvetica()).unwrap_err();
        assert!(matches!(err, BingoError::Font(_)));
    }

    #[test]
    fn negative_padding_is_accepted() {
        let options = CardOptions {
            padding: -4.0,
            ..CardOptions::default()
        };
        let deck = assemble(template(), &phrases(40), 1, 1, &options, &helvetica()).unwrap();
        assert_eq!(deck.grids.len(), 1);
    }

    #[test]
    fn non_finite_padding_is_rejected() {
        let options = CardOptions {
            padding: f64::NAN,
            ..CardOptions::default()
        };
        let err = assemble(template(), &phrases(40), 1, 1, &options, &helvetica()).unwrap_err();
        assert!(matches!(err, BingoError::InvalidPadding(p) if p.is_nan()));
    }

    #[test]
    fn assemble_fails_before_rendering_on_short_lists() {
        let err = assemble(template(), &phrases(10), 2, 1, &CardOptions::default(), &helvetica())
            .unwrap_err();
        assert!(matches!(
            err,
            BingoError::InsufficientItems { required: 24, actual: 10 }
        ));
    }
}
