// src/utils/report_debug.rs
use crate::extractors::classify::LineKind;
use crate::extractors::header::TITLE_LINE;
use crate::extractors::report::{DATA_START, GROUP_LINE, TRAILER_LINES};
use crate::extractors::timestamp::TIMESTAMP_LINE;
use crate::utils::error::AppError;
use std::fs;
use std::path::Path;

/// Renders the report with each line prefixed by its position and role,
/// so a layout change can be spotted by eye.
pub fn annotate_report(lines: &[String]) -> String {
    let trailer_start = lines.len().saturating_sub(TRAILER_LINES).max(DATA_START);
    let mut out = String::new();

    for (pos, line) in lines.iter().enumerate() {
        let tag = match pos {
            TIMESTAMP_LINE => "TIME".to_string(),
            GROUP_LINE => "GROUP".to_string(),
            TITLE_LINE => "TITLE".to_string(),
            p if p >= trailer_start => "TRAIL".to_string(),
            _ => LineKind::of(line).to_string(),
        };
        out.push_str(&format!("{:>6} {:<6} |{}\n", pos, tag, line));
    }
    out
}

/// Saves the annotated copy of the report to `path`.
pub fn save_annotated_report(lines: &[String], path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, annotate_report(lines))?;

    tracing::info!("Saved annotated report to {}", path.display());
    Ok(())
}
