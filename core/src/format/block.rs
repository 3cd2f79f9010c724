//! Renderable block types produced by the formatting pipeline.
//!
//! Every input line maps to exactly one block, except for runs of table-like
//! lines which collapse into a single [`Block::Table`]. Blocks carry no
//! styling themselves; the renderer decides colors and layout.

use serde::Deserialize;
use serde::Serialize;

/// One classified, renderable unit of formatted output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Table(TableBlock),
    Heading(StyledLine),
    SectionLabel { text: StyledLine, kind: SectionKind },
    Note(StyledLine),
    Bullet(StyledLine),
    NumberedItem(StyledLine),
    TrendLine { text: String, direction: TrendDirection },
    Comparison(StyledLine),
    Paragraph { text: StyledLine, variant: ParagraphVariant },
}

/// Which flavor of section label a line was recognized as. Affects
/// presentation only; all three are labels introducing a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    /// The "Owner's Summary" label, rendered distinctly.
    Owner,
    /// Major section headers such as "Executive Summary:".
    Major,
    /// Short lines ending with a colon, treated as sub-headers.
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParagraphVariant {
    /// Contains currency, a percent sign, or a run of 3+ digits.
    Numeric,
    /// Advisory wording ("recommend", "should", ...).
    Recommendation,
    /// Mentions a time period (month, quarter, Q1..Q4, ...).
    Temporal,
    Plain,
}

/// A line of text partitioned into ordered, non-overlapping spans.
///
/// The concatenation of all span texts reproduces the source line exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StyledLine {
    pub spans: Vec<TextSpan>,
}

impl StyledLine {
    /// A line consisting of a single unhighlighted span. An empty string
    /// yields an empty span list.
    pub fn plain(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }
        Self {
            spans: vec![TextSpan {
                text: text.to_string(),
                emphasis: None,
            }],
        }
    }

    /// The source text this line was built from.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub emphasis: Option<Emphasis>,
}

/// Presentation-only emphasis applied to a span of line text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Emphasis {
    /// Thousands-grouped number followed by IQD/USD/$.
    Monetary,
    /// Number followed by '%', optionally prefixed with '≈'.
    Percentage,
    /// Thousands-grouped number not followed by a currency or percent.
    LargeNumber,
    /// Two slash-separated dates joined by '-'.
    DateRange,
    /// Month abbreviation followed by a 4-digit year.
    MonthYear,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableBlock {
    pub headers: Vec<TableCell>,
    pub rows: Vec<Vec<TableCell>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub text: String,
    /// Flagged for rendering emphasis when the cell looks monetary
    /// (contains "IQD", "$", or a comma). Does not affect the data.
    pub monetary: bool,
}

impl TableCell {
    pub fn new(text: &str) -> Self {
        let monetary = text.contains("IQD") || text.contains('$') || text.contains(',');
        Self {
            text: text.to_string(),
            monetary,
        }
    }
}
