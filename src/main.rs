use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};

use bingo_cards_rust::{
    generate, BingoJob, CardOptions, CenterMode, Color, FontSpec, GenerationReport, Margins,
};

/// Generate randomized 5x5 bingo cards as a multi-page PDF over a template.
#[derive(Parser, Debug)]
#[command(name = "bingo-cards", version, about)]
struct Args {
    /// Background template PDF (only the first page is used)
    #[arg(long = "template-pdf", default_value = "aegeeleon-bingo-template.pdf")]
    template_pdf: PathBuf,

    /// Phrase list; only the first column is read
    #[arg(long, default_value = "puntos.csv")]
    csv: PathBuf,

    /// Number of cards to generate
    #[arg(
        short = 'n',
        long = "number",
        default_value_t = 1,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    number: u64,

    /// Random seed; a fresh one is drawn and logged when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Output PDF
    #[arg(long, default_value = "bingos_aegee_leon.pdf")]
    out: PathBuf,

    /// What to do with the center cell
    #[arg(long, value_enum, default_value_t = CenterMode::Keep)]
    center: CenterMode,

    /// Center text when --center free
    #[arg(long = "free-text", default_value = "FREE")]
    free_text: String,

    /// Left margin as a fraction of the page width
    #[arg(long = "m-left", default_value_t = 0.10)]
    m_left: f64,

    #[arg(long = "m-right", default_value_t = 0.10)]
    m_right: f64,

    /// Top margin as a fraction of the page height
    #[arg(long = "m-top", default_value_t = 0.245)]
    m_top: f64,

    #[arg(long = "m-bottom", default_value_t = 0.115)]
    m_bottom: f64,

    /// Built-in PDF font
    #[arg(long = "font-name", default_value = "Helvetica")]
    font_name: String,

    /// TrueType font to embed; overrides --font-name
    #[arg(long = "font-file")]
    font_file: Option<PathBuf>,

    /// Font size in points
    #[arg(long = "font-size", default_value_t = 9.0)]
    font_size: f64,

    /// Text color as #RRGGBB
    #[arg(long = "text-color", default_value = "#000000")]
    text_color: Color,

    /// Inner cell padding in points
    #[arg(long, default_value_t = 6.0)]
    padding: f64,

    /// Also write the card contents as JSON
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long = "log-level", default_value = "warn")]
    log_level: LevelFilter,
}

impl Args {
    fn into_job(self) -> BingoJob {
        BingoJob {
            template: self.template_pdf,
            phrases: self.csv,
            output: self.out,
            count: self.number as usize,
            seed: self.seed,
            manifest: self.manifest,
            options: CardOptions {
                center_mode: self.center,
                free_text: self.free_text,
                margins: Margins::new(self.m_left, self.m_right, self.m_top, self.m_bottom),
                font: FontSpec {
                    name: self.font_name,
                    file: self.font_file,
                    size: self.font_size,
                    color: self.text_color,
                },
                padding: self.padding,
            },
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger_builder = env_logger::Builder::from_default_env();
    if std::env::var_os("RUST_LOG").is_none() {
        logger_builder.filter_level(args.log_level);
    }
    logger_builder.init();

    info!("Configuration: {:?}", args);

    let seed_given = args.seed.is_some();
    let job = args.into_job();
    let report = generate(&job)
        .with_context(|| format!("failed to generate {}", job.output.display()))?;

    println!("{}", summary(&report, seed_given));
    Ok(())
}

/// Success message; a drawn seed is printed so the run can be repeated.
fn summary(report: &GenerationReport, seed_given: bool) -> String {
    let mut message = format!("✔ PDF created: {} ({} pages)", report.output.display(), report.pages);
    if !seed_given {
        message.push_str(&format!("\n  seed: {} (pass --seed {} to repeat)", report.seed, report.seed));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults_match_the_library() {
        let job = Args::parse_from(["bingo-cards"]).into_job();
        assert_eq!(job, BingoJob::default());
    }

    #[test]
    fn zero_cards_is_rejected() {
        assert!(Args::try_parse_from(["bingo-cards", "-n", "0"]).is_err());
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        assert!(Args::try_parse_from(["bingo-cards", "--log-level", "loud"]).is_err());
        let args = Args::parse_from(["bingo-cards", "--log-level", "debug"]);
        assert_eq!(args.log_level, LevelFilter::Debug);
    }

    #[test]
    fn drawn_seed_is_reported() {
        let report = GenerationReport {
            output: PathBuf::from("out.pdf"),
            pages: 3,
            seed: 987654321,
        };
        let drawn = summary(&report, false);
        assert!(drawn.starts_with("✔ PDF created: out.pdf (3 pages)"));
        assert!(drawn.contains("--seed 987654321"));
        assert_eq!(summary(&report, true), "✔ PDF created: out.pdf (3 pages)");
    }

    #[test]
    fn options_are_mapped() {
        let job = Args::parse_from([
            "bingo-cards",
            "-n",
            "4",
            "--seed",
            "7",
            "--center",
            "free",
            "--free-text",
            "LIBRE",
            "--m-left",
            "0.2",
            "--text-color",
            "#ff0000",
        ])
        .into_job();
        assert_eq!(job.count, 4);
        assert_eq!(job.seed, Some(7));
        assert_eq!(job.options.center_mode, CenterMode::Free);
        assert_eq!(job.options.free_text, "LIBRE");
        assert_eq!(job.options.margins.left, 0.2);
        assert_eq!(job.options.font.color, Color::rgb(1.0, 0.0, 0.0));
    }
}
