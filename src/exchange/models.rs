// src/exchange/models.rs
use std::fmt;
use std::path::PathBuf;

/// HTTPS mirror of ftp://ftp.cmegroup.com/pub/settle/stlags (agricultural settlements).
pub const DEFAULT_REPORT_URL: &str = "https://www.cmegroup.com/ftp/pub/settle/stlags";

/// Environment variable consulted when no URL is given on the command line.
pub const REPORT_URL_ENV: &str = "SETTLE_REPORT_URL";

/// Where the raw report comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSource {
    Remote(String),
    File(PathBuf),
}

impl fmt::Display for ReportSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportSource::Remote(url) => write!(f, "{}", url),
            ReportSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The raw report as an ordered list of lines.
#[derive(Debug, Clone)]
pub struct SettlementReport {
    pub source: ReportSource,
    pub lines: Vec<String>,
}

impl SettlementReport {
    /// Splits on `\n` and drops a trailing `\r`. A final newline yields a final
    /// empty line, which then counts as one of the two trailer lines.
    pub fn from_text(source: ReportSource, text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
            .collect();
        Self { source, lines }
    }
}
