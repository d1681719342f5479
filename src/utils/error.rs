// src/utils/error.rs
use thiserror::Error;

// Errors raised while pulling the raw report
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error), // Automatically convert reqwest errors

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Unsupported URL scheme '{scheme}' in {url} (use the https mirror or --input)")]
    UnsupportedScheme { scheme: String, url: String },

    #[error("Could not read report file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

// Errors raised by the fixed-width parser. Every variant carries the
// 0-based line position so a layout change can be told apart from a network problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed header at line {line}: {labels} column labels, {boundaries} column boundaries")]
    MalformedHeader {
        line: usize,
        labels: usize,
        boundaries: usize,
    },

    #[error("Column count mismatch at line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("No settlement timestamp found at line {line}")]
    TimestampNotFound { line: usize },

    #[error("No expiration month found for option at line {line}")]
    ExpirationNotFound { line: usize },
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Report retrieval failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Report parsing failed: {0}")]
    Parse(#[from] ParseError),

    #[error("Output failed: {0}")]
    Output(#[from] OutputError),
}
