// src/extractors/classify.rs
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

// --- Regex Patterns (Lazy Static) ---
// Exchange month codes; July is spelled JLY in the feed.
pub(crate) static EXPIRATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(JAN|FEB|MAR|APR|MAY|JUN|JLY|AUG|SEP|OCT|NOV|DEC)(\d{2})")
        .expect("Failed to compile EXPIRATION_RE")
});

static FUTURE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(JAN|FEB|MAR|APR|MAY|JUN|JLY|AUG|SEP|OCT|NOV|DEC)\d{2}")
        .expect("Failed to compile FUTURE_RE")
});

// Some strikes are negative.
pub(crate) static STRIKE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-?\d+").expect("Failed to compile STRIKE_RE")
});

const TOTAL_TOKEN: &str = "TOTAL";

/// Semantic type of one report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts with a month code and a two-digit year.
    Future,
    /// Starts with a strike.
    Option,
    /// Aggregate line.
    Total,
    /// Anything else starts a new product section, blank lines included.
    Header,
}

impl LineKind {
    /// Classifies a line. Checks run in precedence order
    /// Future > Option > Total > Header, so exactly one kind is returned.
    pub fn of(line: &str) -> Self {
        if FUTURE_RE.is_match(line) {
            LineKind::Future
        } else if STRIKE_RE.is_match(line) {
            LineKind::Option
        } else if line.contains(TOTAL_TOKEN) {
            LineKind::Total
        } else {
            LineKind::Header
        }
    }

    pub fn is_data(self) -> bool {
        matches!(self, LineKind::Future | LineKind::Option)
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            LineKind::Future => "FUT",
            LineKind::Option => "OPT",
            LineKind::Total => "TOTAL",
            LineKind::Header => "HEADER",
        };
        f.write_str(tag)
    }
}

/// One line of the report with its 0-based position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub position: usize,
    pub text: &'a str,
}

impl<'a> RawLine<'a> {
    pub fn new(position: usize, text: &'a str) -> Self {
        Self { position, text }
    }

    pub fn kind(&self) -> LineKind {
        LineKind::of(self.text)
    }
}

/// Maps an exchange month code to its month number ("JAN" -> "1").
pub fn month_number(code: &str) -> Option<&'static str> {
    let month = match code {
        "JAN" => "1",
        "FEB" => "2",
        "MAR" => "3",
        "APR" => "4",
        "MAY" => "5",
        "JUN" => "6",
        "JLY" => "7",
        "AUG" => "8",
        "SEP" => "9",
        "OCT" => "10",
        "NOV" => "11",
        "DEC" => "12",
        _ => return None,
    };
    Some(month)
}
