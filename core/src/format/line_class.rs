//! Per-line classification of non-table lines.
//!
//! The rules form a strict priority chain: they are evaluated top to bottom
//! and the first match wins. Overlapping triggers (a line with both "Note:"
//! and a percentage, say) resolve by this order alone, so do not reorder
//! entries without re-deriving the whole chain.

#![allow(clippy::expect_used)]

use lazy_static::lazy_static;
use regex_lite::Regex;

use crate::format::block::Block;
use crate::format::block::ParagraphVariant;
use crate::format::block::SectionKind;
use crate::format::block::StyledLine;
use crate::format::block::TrendDirection;
use crate::format::highlight::highlight_line;

lazy_static! {
    /// Bare section words, optionally with a trailing colon.
    static ref BARE_SECTION: Regex =
        Regex::new(r"(?i)^(?:Summary|Overview|Performance|Analysis):?$").expect("valid regex");

    /// Numbered list item such as `1.` at the start of the trimmed line.
    static ref NUMBERED: Regex = Regex::new(r"^\d+\.").expect("valid regex");

    /// Run of 3 or more consecutive digits.
    static ref DIGIT_RUN: Regex = Regex::new(r"\d{3,}").expect("valid regex");
}

type Rule = fn(&str) -> Option<Block>;

/// The priority-ordered rule chain. First match wins.
const RULES: &[Rule] = &[
    heading,
    owner_summary,
    major_section,
    note,
    sub_header,
    monetary_bullet,
    bullet,
    trend_line,
    numbered_item,
    comparison,
    numeric_paragraph,
    recommendation_paragraph,
    temporal_paragraph,
];

/// Classify one non-table line into a block. Never fails; the fallback is a
/// plain paragraph (empty lines stay empty and are rendered as a blank
/// placeholder, never collapsed).
pub fn classify_line(line: &str) -> Block {
    RULES
        .iter()
        .find_map(|rule| rule(line))
        .unwrap_or_else(|| Block::Paragraph {
            text: StyledLine::plain(line),
            variant: ParagraphVariant::Plain,
        })
}

fn heading(line: &str) -> Option<Block> {
    (line.contains("Sales Report") || line.contains("Report"))
        .then(|| Block::Heading(highlight_line(line)))
}

fn owner_summary(line: &str) -> Option<Block> {
    // Tolerate the curly apostrophe and its common UTF-8-as-Latin-1
    // mis-encoding alongside the plain ASCII form.
    let is_owner = line.contains("Owner's Summary")
        || line.contains("Owner\u{2019}s Summary")
        || line.contains("Ownerâ€™s Summary");
    is_owner.then(|| Block::SectionLabel {
        text: highlight_line(line),
        kind: SectionKind::Owner,
    })
}

fn major_section(line: &str) -> Option<Block> {
    let is_major = line.contains("Executive Summary:")
        || line.contains("Insights:")
        || line.contains("Key")
        || line.contains("Actionable Insights:")
        || line.contains("Sales Performance:")
        || BARE_SECTION.is_match(line.trim());
    is_major.then(|| Block::SectionLabel {
        text: highlight_line(line),
        kind: SectionKind::Major,
    })
}

fn note(line: &str) -> Option<Block> {
    line.contains("Note:").then(|| Block::Note(highlight_line(line)))
}

fn sub_header(line: &str) -> Option<Block> {
    let trimmed = line.trim();
    (trimmed.ends_with(':') && trimmed.chars().count() < 60).then(|| Block::SectionLabel {
        text: highlight_line(line),
        kind: SectionKind::Sub,
    })
}

fn monetary_bullet(line: &str) -> Option<Block> {
    let monetary = line.trim().starts_with('-')
        && (line.contains("IQD") || line.contains('%') || line.contains('$'));
    // Same block kind as a plain bullet; this rule only pins the precedence
    // of monetary bullets above the trend rule.
    monetary.then(|| Block::Bullet(highlight_line(line)))
}

fn bullet(line: &str) -> Option<Block> {
    let trimmed = line.trim();
    (trimmed.starts_with('-') || trimmed.starts_with('•'))
        .then(|| Block::Bullet(highlight_line(line)))
}

fn trend_line(line: &str) -> Option<Block> {
    let up = line.contains('↑') || line.contains("increased") || line.contains("growth");
    let down = line.contains('↓') || line.contains("decreased") || line.contains("decline");
    if !up && !down {
        return None;
    }
    Some(Block::TrendLine {
        text: line.to_string(),
        direction: if up {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        },
    })
}

fn numbered_item(line: &str) -> Option<Block> {
    NUMBERED
        .is_match(line.trim())
        .then(|| Block::NumberedItem(highlight_line(line)))
}

fn comparison(line: &str) -> Option<Block> {
    (line.contains(" vs ") || line.contains("compared to"))
        .then(|| Block::Comparison(highlight_line(line)))
}

fn numeric_paragraph(line: &str) -> Option<Block> {
    let numeric = line.contains("IQD")
        || line.contains('%')
        || line.contains('$')
        || DIGIT_RUN.is_match(line);
    numeric.then(|| Block::Paragraph {
        text: highlight_line(line),
        variant: ParagraphVariant::Numeric,
    })
}

fn recommendation_paragraph(line: &str) -> Option<Block> {
    let advisory = line.contains("recommend")
        || line.contains("should")
        || line.contains("suggested")
        || line.contains("consider");
    advisory.then(|| Block::Paragraph {
        text: highlight_line(line),
        variant: ParagraphVariant::Recommendation,
    })
}

fn temporal_paragraph(line: &str) -> Option<Block> {
    let temporal = line.contains("month")
        || line.contains("week")
        || line.contains("period")
        || line.contains("quarter")
        || line.contains("Q1")
        || line.contains("Q2")
        || line.contains("Q3")
        || line.contains("Q4");
    temporal.then(|| Block::Paragraph {
        text: highlight_line(line),
        variant: ParagraphVariant::Temporal,
    })
}
