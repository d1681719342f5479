// src/main.rs
mod utils;
mod exchange;
mod extractors;
mod storage;

use clap::Parser;
use exchange::client;
use exchange::models::{ReportSource, DEFAULT_REPORT_URL, REPORT_URL_ENV};
use extractors::{ProductFilter, ReportParser};
use std::path::PathBuf;
use storage::{OutputFormat, RecordWriter};
use utils::AppError;

/// Converts the exchange's fixed-width settlement report into one record per contract line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Report URL (default: $SETTLE_REPORT_URL, then the CME agricultural settlement file)
    #[arg(long, conflicts_with = "input")]
    url: Option<String>,

    /// Read the report from a local file instead of downloading it
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Only emit sections whose heading contains this product name (repeatable)
    #[arg(short = 'p', long = "product")]
    products: Vec<String>,

    /// Write records to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output line format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    format: OutputFormat,

    /// Save a copy of the report with every line tagged by its classification
    #[arg(long)]
    annotate: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    run(args).await.map_err(|e| {
        tracing::error!("Run failed, nothing emitted: {}", e);
        e
    })
}

async fn run(args: Args) -> Result<(), AppError> {
    // 3. Pull the report
    let source = resolve_source(&args, std::env::var(REPORT_URL_ENV).ok())?;
    let report = client::load_report(&source).await?;
    tracing::info!("Loaded {} lines from {}", report.lines.len(), report.source);

    if let Some(path) = &args.annotate {
        utils::report_debug::save_annotated_report(&report.lines, path)?;
    }

    // 4. Parse the whole report before emitting anything
    let parser = ReportParser::new(ProductFilter::new(args.products.clone()));
    let parsed = parser.parse(&report.lines)?;
    tracing::debug!("{} columns: {:?}", parsed.layout.len(), parsed.layout.labels());

    // 5. Emit
    let writer = RecordWriter::new(args.format);
    match &args.output {
        Some(path) => {
            writer.save_records(&parsed.records, path)?;
        }
        None => {
            let stdout = std::io::stdout();
            writer.write_records(&parsed.records, stdout.lock())?;
        }
    }

    tracing::info!(
        "Processing finished. {} records from report published {}",
        parsed.records.len(),
        parsed.settlement_time.raw
    );
    Ok(())
}

/// Local file wins; otherwise the URL flag, then the environment, then the default.
fn resolve_source(args: &Args, env_url: Option<String>) -> Result<ReportSource, AppError> {
    if let Some(path) = &args.input {
        return Ok(ReportSource::File(path.clone()));
    }

    let url = match (&args.url, env_url) {
        (Some(url), _) => url.clone(),
        (None, Some(url)) => {
            tracing::debug!("Using report URL from {}", REPORT_URL_ENV);
            url
        }
        (None, None) => DEFAULT_REPORT_URL.to_string(),
    };

    if url.trim().is_empty() {
        return Err(AppError::Config("Report URL is empty".to_string()));
    }
    Ok(ReportSource::Remote(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["settle_extractor"]).unwrap();
        assert_eq!(args.format, OutputFormat::Csv);
        assert!(args.products.is_empty());
        assert_eq!(
            resolve_source(&args, None).unwrap(),
            ReportSource::Remote(DEFAULT_REPORT_URL.to_string())
        );
    }

    #[test]
    fn test_repeated_products_and_format() {
        let args = Args::try_parse_from([
            "settle_extractor", "-p", "CORN", "--product", "SOYBEAN OIL", "-f", "json",
        ])
        .unwrap();
        assert_eq!(args.products, vec!["CORN", "SOYBEAN OIL"]);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_source_precedence() {
        let args = Args::try_parse_from(["settle_extractor", "-i", "stlags.txt"]).unwrap();
        assert_eq!(
            resolve_source(&args, Some("https://example.com/x".to_string())).unwrap(),
            ReportSource::File(PathBuf::from("stlags.txt"))
        );

        let args = Args::try_parse_from(["settle_extractor", "--url", "https://a.test/stlags"]).unwrap();
        assert_eq!(
            resolve_source(&args, Some("https://b.test/stlags".to_string())).unwrap(),
            ReportSource::Remote("https://a.test/stlags".to_string())
        );

        let args = Args::try_parse_from(["settle_extractor"]).unwrap();
        assert_eq!(
            resolve_source(&args, Some("https://b.test/stlags".to_string())).unwrap(),
            ReportSource::Remote("https://b.test/stlags".to_string())
        );
        assert!(matches!(
            resolve_source(&args, Some("  ".to_string())),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_url_conflicts_with_input() {
        assert!(Args::try_parse_from(["settle_extractor", "--url", "https://a.test", "-i", "f"]).is_err());
    }
}
