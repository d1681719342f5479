// src/extractors/timestamp.rs
use crate::utils::error::ParseError;
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

/// Position of the line carrying the publication timestamp.
pub const TIMESTAMP_LINE: usize = 0;

// e.g. "12/15/10 06:00 PM"
static SETTLEMENT_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}/\d{2}/\d{2} \d{2}:\d{2} \w{2}").expect("Failed to compile SETTLEMENT_TIME_RE")
});

const SETTLEMENT_TIME_FORMAT: &str = "%m/%d/%y %I:%M %p";

/// Publication time of the report, as printed and as parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementTime {
    pub raw: String,
    pub at: NaiveDateTime,
}

impl SettlementTime {
    /// Finds the timestamp embedded in the report's first line.
    pub fn from_line(line: &str) -> Result<Self, ParseError> {
        let not_found = ParseError::TimestampNotFound { line: TIMESTAMP_LINE };

        let raw = SETTLEMENT_TIME_RE
            .find(line)
            .ok_or_else(|| not_found.clone())?
            .as_str();

        let at = NaiveDateTime::parse_from_str(raw, SETTLEMENT_TIME_FORMAT).map_err(|e| {
            tracing::warn!("Timestamp-shaped text '{}' does not parse: {}", raw, e);
            not_found
        })?;

        Ok(Self { raw: raw.to_string(), at })
    }
}
