//! Best-effort table detection and parsing.
//!
//! The classifier accumulates consecutive table-like lines into a buffer and
//! flushes it when a non-table line (or end of input) is reached. A flush
//! with at least two lines and a usable header row becomes a single
//! [`TableBlock`]; anything shorter falls back to per-line classification so
//! no input line is ever dropped.

#![allow(clippy::expect_used)]

use lazy_static::lazy_static;
use regex_lite::Regex;

use crate::format::block::TableBlock;
use crate::format::block::TableCell;

lazy_static! {
    /// Run of 3 or more whitespace characters.
    static ref WIDE_GAP: Regex = Regex::new(r"\s{3,}").expect("valid regex");

    /// `Country | 1,234`-shaped line: words, a vertical bar, then a number
    /// possibly with separators/decimals.
    static ref LABEL_BAR_NUMBER: Regex =
        Regex::new(r"^\s*[\w\s]+\s*\|\s*[\d,.]+").expect("valid regex");

    /// Run of 2 or more spaces, the column delimiter of whitespace tables.
    static ref COLUMN_GAP: Regex = Regex::new(r"\s{2,}").expect("valid regex");
}

/// Whether a line might be part of a table.
pub fn is_table_line(line: &str) -> bool {
    let trimmed = line.trim();
    line.contains('|')
        || WIDE_GAP.is_match(line)
        || trimmed.starts_with('|')
        || trimmed.starts_with('+')
        || (line.contains("Country")
            && (line.contains("Sales")
                || line.contains("Units")
                || line.contains("Transactions")))
        || LABEL_BAR_NUMBER.is_match(line)
}

/// Accumulates table-like lines between flushes. An explicit two-state
/// machine: `Outside` between tables, `Inside` while collecting candidates.
#[derive(Debug, Default)]
pub enum TableState {
    #[default]
    Outside,
    Inside(Vec<String>),
}

impl TableState {
    pub fn push(&mut self, line: &str) {
        match self {
            TableState::Outside => *self = TableState::Inside(vec![line.to_string()]),
            TableState::Inside(buf) => buf.push(line.to_string()),
        }
    }

    /// Take the buffered candidate lines, resetting to `Outside`.
    pub fn take(&mut self) -> Vec<String> {
        match std::mem::take(self) {
            TableState::Outside => Vec::new(),
            TableState::Inside(buf) => buf,
        }
    }
}

/// Parse an accumulated candidate buffer into a table.
///
/// Returns `None` when the buffer has fewer than 2 lines or no non-empty
/// header row; the caller then classifies the buffered lines individually.
pub fn parse_table(lines: &[String]) -> Option<TableBlock> {
    if lines.len() < 2 {
        return None;
    }
    let header_index = lines.iter().position(|line| !line.trim().is_empty())?;
    let header_row = &lines[header_index];

    let vertical_bar = header_row.contains('|');
    let headers = parse_row(header_row, vertical_bar);
    let rows = lines[header_index + 1..]
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_row(line, vertical_bar))
        .collect();

    Some(TableBlock { headers, rows })
}

fn parse_row(row: &str, vertical_bar: bool) -> Vec<TableCell> {
    if vertical_bar {
        row.split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(TableCell::new)
            .collect()
    } else {
        COLUMN_GAP
            .split(row.trim())
            .map(|cell| TableCell::new(cell.trim()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(cells: &[TableCell]) -> Vec<&str> {
        cells.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn detects_vertical_bar_lines() {
        assert!(is_table_line("Iraq | 1,200,000 IQD"));
        assert!(is_table_line("| a | b |"));
    }

    #[test]
    fn detects_wide_whitespace_lines() {
        assert!(is_table_line("Iraq    1,200,000"));
        assert!(!is_table_line("Iraq 1,200,000"));
    }

    #[test]
    fn detects_border_and_header_keywords() {
        assert!(is_table_line("+----+----+"));
        assert!(is_table_line("Country  Sales"));
        assert!(!is_table_line("Country only"));
    }

    #[test]
    fn single_line_is_not_a_table() {
        assert_eq!(parse_table(&["Iraq | 1,200".to_string()]), None);
    }

    #[test]
    fn all_empty_buffer_has_no_header() {
        let lines = vec!["   ".to_string(), "".to_string()];
        assert_eq!(parse_table(&lines), None);
    }

    #[test]
    fn parses_vertical_bar_table() {
        let lines = vec![
            "Country | Sales".to_string(),
            "Iraq | 1,200,000 IQD".to_string(),
            "Iran | 800,000 IQD".to_string(),
        ];
        let table = parse_table(&lines).expect("table");
        assert_eq!(texts(&table.headers), vec!["Country", "Sales"]);
        assert_eq!(texts(&table.rows[0]), vec!["Iraq", "1,200,000 IQD"]);
        assert_eq!(texts(&table.rows[1]), vec!["Iran", "800,000 IQD"]);
        assert!(table.rows[0][1].monetary);
        assert!(table.rows[1][1].monetary);
    }

    #[test]
    fn parses_whitespace_table() {
        let lines = vec![
            "Country   Sales   Units".to_string(),
            "Iraq      1,200   40".to_string(),
        ];
        let table = parse_table(&lines).expect("table");
        assert_eq!(texts(&table.headers), vec!["Country", "Sales", "Units"]);
        assert_eq!(texts(&table.rows[0]), vec!["Iraq", "1,200", "40"]);
    }

    #[test]
    fn skips_leading_empty_lines_when_finding_header() {
        let lines = vec![
            "".to_string(),
            "Country | Sales".to_string(),
            "Iraq | 5".to_string(),
        ];
        let table = parse_table(&lines).expect("table");
        assert_eq!(texts(&table.headers), vec!["Country", "Sales"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn ragged_rows_are_preserved() {
        let lines = vec![
            "A | B | C".to_string(),
            "1 | 2".to_string(),
            "1 | 2 | 3 | 4".to_string(),
        ];
        let table = parse_table(&lines).expect("table");
        assert_eq!(table.headers.len(), 3);
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[1].len(), 4);
    }

    #[test]
    fn empty_lines_between_rows_are_skipped() {
        let lines = vec![
            "A | B".to_string(),
            "".to_string(),
            "1 | 2".to_string(),
        ];
        let table = parse_table(&lines).expect("table");
        assert_eq!(table.rows.len(), 1);
    }
}
