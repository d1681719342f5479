// src/extractors/header.rs
use crate::utils::error::ParseError;

/// Position of the column-title line in the report.
pub const TITLE_LINE: usize = 2;

/// Column labels and the character offset where each column's value ends.
///
/// Every column except the first is right-justified, so its value ends on the
/// last character of its label. The first column is left-justified and its
/// boundary is pinned to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    labels: Vec<String>,
    boundaries: Vec<usize>,
}

impl ColumnLayout {
    /// Builds the layout from the report's two header lines.
    /// Only the title line carries positions; the group line is informational.
    pub fn from_header_lines(group_line: &str, title_line: &str) -> Result<Self, ParseError> {
        tracing::debug!("Header groups: '{}'", group_line.trim());
        Self::from_title_line(title_line)
    }

    pub fn from_title_line(title_line: &str) -> Result<Self, ParseError> {
        let labels: Vec<String> = title_line.split_whitespace().map(str::to_string).collect();
        let mut boundaries = word_ends(title_line);

        if labels.len() < 2 || boundaries.len() != labels.len() {
            tracing::error!("Unusable column-title line: '{}'", title_line);
            return Err(ParseError::MalformedHeader {
                line: TITLE_LINE,
                labels: labels.len(),
                boundaries: boundaries.len(),
            });
        }

        boundaries[0] = 0;

        tracing::debug!("Column layout: {:?} at {:?}", labels, boundaries);
        Ok(Self { labels, boundaries })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn boundaries(&self) -> &[usize] {
        &self.boundaries
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

// Index of each word character followed by a space or the end of the line.
fn word_ends(line: &str) -> Vec<usize> {
    let chars: Vec<char> = line.chars().collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(i, c)| {
            let is_word = c.is_ascii_alphanumeric() || *c == '_';
            is_word && chars.get(i + 1).map_or(true, |next| *next == ' ')
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CME_TITLE: &str = "STRIKE     OPEN      HIGH      LOW       LAST      SETT    CHGE     EST.VOL       SETT         VOL         INT";

    #[test]
    fn test_cme_title_line() {
        let layout = ColumnLayout::from_title_line(CME_TITLE).unwrap();
        assert_eq!(layout.len(), 11);
        assert_eq!(layout.labels()[7], "EST.VOL");
        assert_eq!(
            layout.boundaries(),
            &[0, 14, 24, 33, 44, 54, 62, 74, 85, 97, 109]
        );
    }

    #[test]
    fn test_first_boundary_is_always_zero() {
        for title in ["A B", "   STRIKE OPEN", "MONTH/STRIKE      OPEN   HIGH", "X1 Y2 Z3"] {
            let layout = ColumnLayout::from_title_line(title).unwrap();
            assert_eq!(layout.boundaries()[0], 0, "title: {}", title);
            assert_eq!(layout.boundaries().len(), layout.len());
        }
    }

    #[test]
    fn test_short_header_is_malformed() {
        let err = ColumnLayout::from_title_line("STRIKE").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedHeader { line: TITLE_LINE, labels: 1, boundaries: 1 }
        );
        assert!(ColumnLayout::from_title_line("   ").is_err());
    }

    #[test]
    fn test_label_ending_in_punctuation_is_malformed() {
        let err = ColumnLayout::from_title_line("MTH/ OPEN HIGH").unwrap_err();
        assert!(matches!(err, ParseError::MalformedHeader { labels: 3, boundaries: 2, .. }));
    }

    #[test]
    fn test_group_line_does_not_affect_layout() {
        let group = "MTH/                 ---- DAILY ---                        PT";
        let a = ColumnLayout::from_header_lines(group, CME_TITLE).unwrap();
        let b = ColumnLayout::from_title_line(CME_TITLE).unwrap();
        assert_eq!(a, b);
    }
}
