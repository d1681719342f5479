// src/extractors/report.rs
use crate::extractors::classify::{LineKind, RawLine};
use crate::extractors::header::{ColumnLayout, TITLE_LINE};
use crate::extractors::record::{build_record, Record, RowContext};
use crate::extractors::timestamp::{SettlementTime, TIMESTAMP_LINE};
use crate::utils::error::ParseError;

// --- Constants ---
pub const GROUP_LINE: usize = 1;
pub const DATA_START: usize = 3;
// The last two lines are trailer text.
pub const TRAILER_LINES: usize = 2;

/// Restricts output to sections whose heading names one of the products.
/// An empty filter admits every section.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    products: Vec<String>,
}

impl ProductFilter {
    pub fn new(products: Vec<String>) -> Self {
        Self { products }
    }

    pub fn admits(&self, section: Option<&str>) -> bool {
        if self.products.is_empty() {
            return true;
        }
        section.is_some_and(|s| self.products.iter().any(|p| s.contains(p.as_str())))
    }
}

/// Everything derived from one pass over a report.
#[derive(Debug, Clone)]
pub struct ParsedReport {
    pub settlement_time: SettlementTime,
    pub layout: ColumnLayout,
    pub records: Vec<Record>,
}

pub struct ReportParser {
    filter: ProductFilter,
}

impl ReportParser {
    pub fn new(filter: ProductFilter) -> Self {
        Self { filter }
    }

    /// Parses a whole report. The first error aborts the pass and no records are returned.
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> Result<ParsedReport, ParseError> {
        let first = lines
            .get(TIMESTAMP_LINE)
            .ok_or(ParseError::TimestampNotFound { line: TIMESTAMP_LINE })?;
        let settlement_time = SettlementTime::from_line(first.as_ref())?;
        tracing::info!("Report published {} ({})", settlement_time.raw, settlement_time.at);

        let title = lines.get(TITLE_LINE).ok_or(ParseError::MalformedHeader {
            line: TITLE_LINE,
            labels: 0,
            boundaries: 0,
        })?;
        let group = lines.get(GROUP_LINE).map_or("", |l| l.as_ref());
        let layout = ColumnLayout::from_header_lines(group, title.as_ref())?;

        let end = lines.len().saturating_sub(TRAILER_LINES);
        let data: &[S] = if end > DATA_START { &lines[DATA_START..end] } else { &[] };

        let width = data
            .iter()
            .map(|l| l.as_ref())
            .filter(|l| LineKind::of(l).is_data())
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        tracing::debug!("{} data-region lines, padded to {} characters", data.len(), width);

        let start = RowContext {
            section: None,
            layout: &layout,
            width,
            settlement_time: &settlement_time.raw,
        };

        // Section context is carried forward line by line; a heading replaces it.
        let (_, records) = data
            .iter()
            .enumerate()
            .map(|(i, l)| RawLine::new(DATA_START + i, l.as_ref()))
            .try_fold(
                (start, Vec::new()),
                |(ctx, mut records), line| -> Result<_, ParseError> {
                    match line.kind() {
                        LineKind::Header => {
                            tracing::debug!("Section at line {}: '{}'", line.position, line.text.trim());
                            return Ok((RowContext { section: Some(line.text), ..ctx }, records));
                        }
                        LineKind::Total => {
                            tracing::trace!("Skipping total at line {}", line.position);
                        }
                        LineKind::Future | LineKind::Option => {
                            if self.filter.admits(ctx.section) {
                                if let Some(record) = build_record(line, &ctx)? {
                                    records.push(record);
                                }
                            }
                        }
                    }
                    Ok((ctx, records))
                },
            )?;

        tracing::info!("Extracted {} records from {} lines", records.len(), data.len());
        Ok(ParsedReport { settlement_time, layout, records })
    }
}
