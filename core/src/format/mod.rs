//! The response-formatting pipeline.
//!
//! Turns a raw webhook response into an ordered sequence of renderable
//! [`Block`]s: strip transport markers, split into lines, then scan once
//! with a table-accumulation state machine, classifying every non-table
//! line through the priority rule chain.
//!
//! The pipeline is pure and cannot fail: every input string, including
//! empty or malformed text, produces a valid (possibly empty) block
//! sequence.

pub mod block;
pub mod highlight;
pub mod line_class;
pub mod strip;
pub mod table;

pub use block::Block;
pub use block::Emphasis;
pub use block::ParagraphVariant;
pub use block::SectionKind;
pub use block::StyledLine;
pub use block::TableBlock;
pub use block::TableCell;
pub use block::TextSpan;
pub use block::TrendDirection;

use line_class::classify_line;
use strip::strip_markers;
use table::TableState;
use table::is_table_line;
use table::parse_table;

/// Format a raw webhook response into renderable blocks.
pub fn format_response(raw: &str) -> Vec<Block> {
    let cleaned = strip_markers(raw);
    if cleaned.is_empty() {
        return Vec::new();
    }

    let mut blocks = Vec::new();
    let mut state = TableState::Outside;

    for line in cleaned.split('\n') {
        if is_table_line(line) {
            state.push(line);
        } else {
            flush_table(&mut state, &mut blocks);
            blocks.push(classify_line(line));
        }
    }
    flush_table(&mut state, &mut blocks);

    blocks
}

/// Convert the accumulated candidate lines into a table block, or fall back
/// to classifying each buffered line individually when the run is too short
/// to form a table. Either way every buffered line ends up represented.
fn flush_table(state: &mut TableState, blocks: &mut Vec<Block>) {
    let buffered = state.take();
    if buffered.is_empty() {
        return;
    }
    match parse_table(&buffered) {
        Some(table) => blocks.push(Block::Table(table)),
        None => blocks.extend(buffered.iter().map(|line| classify_line(line))),
    }
}
