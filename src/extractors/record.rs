// src/extractors/record.rs
use crate::extractors::classify::{month_number, LineKind, RawLine, EXPIRATION_RE, STRIKE_RE};
use crate::extractors::header::ColumnLayout;
use crate::utils::error::ParseError;
use serde::Serialize;

/// Token count of a repaired data row: key, five prices, change, four prior-day fields.
pub const SETTLEMENT_COLUMNS: usize = 11;

/// Sentinel for a value the report does not carry.
const NO_VALUE: &str = "0";

// --- Data Structures ---
/// One normalized contract line. Every field is text; "0" stands for no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub settlement_time: String,
    pub symbol: String,       // Section heading verbatim; ticker extraction is not done
    pub indicator: String,    // "F", "P" or "C"
    pub exp_month: String,
    pub exp_day: String,      // Always "0" in this layout
    pub exp_year: String,
    pub strike: String,       // "0" for futures
    pub open: String,
    pub high: String,
    pub low: String,
    pub last: String,
    pub settle: String,
    pub est_volume: String,
    pub prior_settle: String,
    pub prior_volume: String,
    pub prior_open_interest: String,
}

impl Record {
    /// Fields in output order.
    pub fn fields(&self) -> [&str; 16] {
        [
            &self.settlement_time,
            &self.symbol,
            &self.indicator,
            &self.exp_month,
            &self.exp_day,
            &self.exp_year,
            &self.strike,
            &self.open,
            &self.high,
            &self.low,
            &self.last,
            &self.settle,
            &self.est_volume,
            &self.prior_settle,
            &self.prior_volume,
            &self.prior_open_interest,
        ]
    }
}

/// Best-effort product type read from a section heading.
///
/// The heading is free text, so this is a substring match over an ordered
/// rule list. Swaps, rate contracts and spread structures carry none of the
/// keywords and end up as `Unknown`, which is reported as a future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractType {
    Future,
    Put,
    Call,
    Unknown,
}

const CONTRACT_RULES: [(&str, ContractType); 3] = [
    ("PUT", ContractType::Put),
    ("CALL", ContractType::Call),
    ("FUT", ContractType::Future),
];

impl ContractType {
    pub fn from_section(section: &str) -> Self {
        CONTRACT_RULES
            .iter()
            .find(|(keyword, _)| section.contains(keyword))
            .map_or(ContractType::Unknown, |&(_, kind)| kind)
    }

    pub fn indicator(self) -> &'static str {
        match self {
            ContractType::Put => "P",
            ContractType::Call => "C",
            ContractType::Future | ContractType::Unknown => "F",
        }
    }
}

/// Report-wide state a data row is interpreted against.
#[derive(Debug, Clone, Copy)]
pub struct RowContext<'a> {
    pub section: Option<&'a str>,
    pub layout: &'a ColumnLayout,
    pub width: usize,
    pub settlement_time: &'a str,
}

/// Builds the record for one report line, or `None` for heading and total lines.
pub fn build_record(line: RawLine<'_>, ctx: &RowContext<'_>) -> Result<Option<Record>, ParseError> {
    let kind = line.kind();
    if !kind.is_data() {
        return Ok(None);
    }

    let repaired = repair_blank_columns(line.text, ctx.width, ctx.layout);
    let tokens: Vec<&str> = repaired.split_whitespace().collect();
    if tokens.len() != SETTLEMENT_COLUMNS {
        tracing::error!("Line {} splits into {} columns: '{}'", line.position, tokens.len(), repaired);
        return Err(ParseError::ColumnCount {
            line: line.position,
            expected: SETTLEMENT_COLUMNS,
            found: tokens.len(),
        });
    }

    let section = ctx.section.unwrap_or_default();

    // Options carry only a strike; their expiration lives in the section heading.
    let (exp_month, exp_year, strike) = match kind {
        LineKind::Future => {
            let (month, year) = expiration(line.text)
                .ok_or(ParseError::ExpirationNotFound { line: line.position })?;
            (month, year, NO_VALUE)
        }
        _ => {
            let (month, year) = expiration(section)
                .ok_or(ParseError::ExpirationNotFound { line: line.position })?;
            let strike = STRIKE_RE.find(line.text).map_or(NO_VALUE, |m| m.as_str());
            (month, year, strike)
        }
    };

    let contract = ContractType::from_section(section);
    if contract == ContractType::Unknown {
        tracing::debug!("No contract keyword in section '{}', defaulting to future", section);
    }

    Ok(Some(Record {
        settlement_time: ctx.settlement_time.to_string(),
        symbol: section.to_string(),
        indicator: contract.indicator().to_string(),
        exp_month: exp_month.to_string(),
        exp_day: NO_VALUE.to_string(),
        exp_year: exp_year.to_string(),
        strike: strike.to_string(),
        open: tokens[1].to_string(),
        high: tokens[2].to_string(),
        low: tokens[3].to_string(),
        last: tokens[4].to_string(),
        settle: tokens[5].to_string(),
        // tokens[6] is the change column
        est_volume: tokens[7].to_string(),
        prior_settle: tokens[8].to_string(),
        prior_volume: tokens[9].to_string(),
        prior_open_interest: tokens[10].to_string(),
    }))
}

/// Month number and two-digit year of the first month code in `text`.
fn expiration(text: &str) -> Option<(&'static str, &str)> {
    let caps = EXPIRATION_RE.captures(text)?;
    let month = month_number(caps.get(1)?.as_str())?;
    Some((month, caps.get(2)?.as_str()))
}

/// Pads `text` to `width` and writes "0" into every blank column boundary.
///
/// A boundary is filled only when the digit forms a token of its own, i.e.
/// both neighbours are blank or past the line edge.
fn repair_blank_columns(text: &str, width: usize, layout: &ColumnLayout) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    if chars.len() < width {
        chars.resize(width, ' ');
    }

    let blank = |pos: Option<usize>| pos.and_then(|p| chars.get(p)).map_or(true, |c| *c == ' ');
    let fill: Vec<usize> = layout
        .boundaries()
        .iter()
        .copied()
        .filter(|&pos| {
            chars.get(pos) == Some(&' ') && blank(pos.checked_sub(1)) && blank(Some(pos + 1))
        })
        .collect();

    for pos in fill {
        chars[pos] = '0';
    }
    chars.into_iter().collect()
}
