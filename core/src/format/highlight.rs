//! Inline emphasis spans for monetary values, percentages, large numbers,
//! and date-like runs.
//!
//! Patterns are applied in a fixed priority order and are first-match-wins
//! per character span: once a range of the line is claimed by one pattern,
//! later patterns skip any match overlapping it.

#![allow(clippy::expect_used)]

use lazy_static::lazy_static;
use regex_lite::Regex;

use crate::format::block::Emphasis;
use crate::format::block::StyledLine;
use crate::format::block::TextSpan;

lazy_static! {
    /// Thousands-grouped number followed by a currency marker.
    static ref MONETARY: Regex =
        Regex::new(r"\d{1,3}(?:,\d{3})*(?:\.\d+)?\s*(?:IQD|USD|\$)").expect("valid regex");

    /// Number followed by '%', with an optional '≈' prefix.
    static ref PERCENTAGE: Regex = Regex::new(r"≈?\d+(?:\.\d+)?%").expect("valid regex");

    /// Thousands-grouped number. Whether it counts as a plain large number
    /// (rather than part of a monetary/percentage run) is decided by
    /// inspecting the text that follows, since regex-lite has no lookahead.
    static ref GROUPED_NUMBER: Regex =
        Regex::new(r"\b\d{1,3}(?:,\d{3})+(?:\.\d+)?\b").expect("valid regex");

    /// Two slash-separated dates joined by '-'.
    static ref DATE_RANGE: Regex =
        Regex::new(r"\d{1,2}/\d{1,2}/\d{2,4}\s*-\s*\d{1,2}/\d{1,2}/\d{2,4}").expect("valid regex");

    /// Month abbreviation (3+ letters) followed by a 4-digit year.
    static ref MONTH_YEAR: Regex = Regex::new(
        r"(?i)\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{4}\b"
    )
    .expect("valid regex");

    /// What must NOT follow a grouped number for it to be a plain large
    /// number: a currency marker or percent sign after optional whitespace.
    static ref CURRENCY_FOLLOWS: Regex =
        Regex::new(r"^\s*(?:IQD|USD|\$|%)").expect("valid regex");
}

/// Partition `text` into emphasis spans. The concatenation of the produced
/// span texts is exactly `text`.
pub fn highlight_line(text: &str) -> StyledLine {
    let mut claimed: Vec<(usize, usize, Emphasis)> = Vec::new();

    let mut claim = |start: usize, end: usize, emphasis: Emphasis| {
        let overlaps = claimed.iter().any(|&(s, e, _)| start < e && s < end);
        if !overlaps {
            claimed.push((start, end, emphasis));
        }
    };

    for m in MONETARY.find_iter(text) {
        claim(m.start(), m.end(), Emphasis::Monetary);
    }
    for m in PERCENTAGE.find_iter(text) {
        claim(m.start(), m.end(), Emphasis::Percentage);
    }
    for m in GROUPED_NUMBER.find_iter(text) {
        if !CURRENCY_FOLLOWS.is_match(&text[m.end()..]) {
            claim(m.start(), m.end(), Emphasis::LargeNumber);
        }
    }
    for m in DATE_RANGE.find_iter(text) {
        claim(m.start(), m.end(), Emphasis::DateRange);
    }
    for m in MONTH_YEAR.find_iter(text) {
        claim(m.start(), m.end(), Emphasis::MonthYear);
    }

    claimed.sort_by_key(|&(start, _, _)| start);

    let mut spans = Vec::new();
    let mut cursor = 0;
    for (start, end, emphasis) in claimed {
        if cursor < start {
            spans.push(TextSpan {
                text: text[cursor..start].to_string(),
                emphasis: None,
            });
        }
        spans.push(TextSpan {
            text: text[start..end].to_string(),
            emphasis: Some(emphasis),
        });
        cursor = end;
    }
    if cursor < text.len() {
        spans.push(TextSpan {
            text: text[cursor..].to_string(),
            emphasis: None,
        });
    }

    StyledLine { spans }
}
