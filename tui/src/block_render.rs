//! Renders formatted blocks into ratatui lines.
//!
//! The palette mirrors the hosted client: monetary runs in green,
//! percentages in blue, bare large numbers in yellow, date spans in magenta,
//! trend lines whole-line green or red, notes dim and italic.

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;
use widd_core::format::Block;
use widd_core::format::Emphasis;
use widd_core::format::ParagraphVariant;
use widd_core::format::SectionKind;
use widd_core::format::StyledLine;
use widd_core::format::TableBlock;
use widd_core::format::TrendDirection;

/// Shown in place of an empty line so vertical spacing is preserved.
const BLANK_PLACEHOLDER: &str = "\u{00a0}";

pub fn render_blocks(blocks: &[Block]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for block in blocks {
        match block {
            Block::Table(table) => lines.extend(render_table(table)),
            Block::Heading(text) => lines.push(styled_line(
                text,
                Style::default()
                    .fg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                "",
            )),
            Block::SectionLabel { text, kind } => {
                lines.push(styled_line(text, section_style(*kind), ""))
            }
            Block::Note(text) => lines.push(styled_line(
                text,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
                "",
            )),
            Block::Bullet(text) | Block::NumberedItem(text) => {
                lines.push(styled_line(text, Style::default(), "  "))
            }
            Block::TrendLine { text, direction } => {
                let color = match direction {
                    TrendDirection::Up => Color::Green,
                    TrendDirection::Down => Color::Red,
                };
                lines.push(Line::from(Span::styled(
                    text.clone(),
                    Style::default().fg(color),
                )));
            }
            Block::Comparison(text) => lines.push(styled_line(
                text,
                Style::default().add_modifier(Modifier::ITALIC),
                "",
            )),
            Block::Paragraph { text, variant } => {
                if text.spans.is_empty() {
                    lines.push(Line::from(BLANK_PLACEHOLDER));
                } else {
                    lines.push(styled_line(text, paragraph_style(*variant), ""));
                }
            }
        }
    }
    lines
}

fn section_style(kind: SectionKind) -> Style {
    match kind {
        SectionKind::Owner => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        SectionKind::Major => Style::default()
            .fg(Color::Blue)
            .add_modifier(Modifier::BOLD),
        SectionKind::Sub => Style::default()
            .fg(Color::LightBlue)
            .add_modifier(Modifier::BOLD),
    }
}

fn paragraph_style(variant: ParagraphVariant) -> Style {
    match variant {
        ParagraphVariant::Recommendation => Style::default().fg(Color::LightBlue),
        ParagraphVariant::Numeric | ParagraphVariant::Temporal | ParagraphVariant::Plain => {
            Style::default()
        }
    }
}

fn emphasis_style(emphasis: Emphasis) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match emphasis {
        Emphasis::Monetary => style.fg(Color::Green),
        Emphasis::Percentage => style.fg(Color::Blue),
        Emphasis::LargeNumber => style.fg(Color::Yellow),
        Emphasis::DateRange | Emphasis::MonthYear => style.fg(Color::Magenta),
    }
}

/// Build one rendered line from a styled source line, patching emphasis
/// styles over the base style. `indent` is prepended unstyled.
fn styled_line(text: &StyledLine, base: Style, indent: &str) -> Line<'static> {
    let mut spans = Vec::with_capacity(text.spans.len() + 1);
    if !indent.is_empty() {
        spans.push(Span::raw(indent.to_string()));
    }
    for span in &text.spans {
        let style = match span.emphasis {
            Some(emphasis) => base.patch(emphasis_style(emphasis)),
            None => base,
        };
        spans.push(Span::styled(span.text.clone(), style));
    }
    Line::from(spans)
}

/// Render a table as a box-drawn grid. Rows may be ragged; column widths
/// cover the widest cell seen in each position.
fn render_table(table: &TableBlock) -> Vec<Line<'static>> {
    let column_count = std::iter::once(table.headers.len())
        .chain(table.rows.iter().map(Vec::len))
        .max()
        .unwrap_or(0);
    if column_count == 0 {
        return Vec::new();
    }

    let mut widths = vec![0usize; column_count];
    for (i, cell) in table.headers.iter().enumerate() {
        widths[i] = widths[i].max(UnicodeWidthStr::width(cell.text.as_str()));
    }
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(UnicodeWidthStr::width(cell.text.as_str()));
        }
    }

    let border = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::with_capacity(table.rows.len() + 2);

    let header_cells: Vec<(String, Style)> = table
        .headers
        .iter()
        .map(|cell| {
            (
                cell.text.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    lines.push(grid_line(&header_cells, &widths, border));

    let separator: String = widths
        .iter()
        .map(|w| "─".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("┼");
    lines.push(Line::from(Span::styled(separator, border)));

    for row in &table.rows {
        let cells: Vec<(String, Style)> = row
            .iter()
            .map(|cell| {
                let style = if cell.monetary {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                (cell.text.clone(), style)
            })
            .collect();
        lines.push(grid_line(&cells, &widths, border));
    }

    lines
}

fn grid_line(cells: &[(String, Style)], widths: &[usize], border: Style) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("│".to_string(), border));
        }
        let (text, style) = cells
            .get(i)
            .map(|(t, s)| (t.as_str(), *s))
            .unwrap_or(("", Style::default()));
        let pad = width.saturating_sub(UnicodeWidthStr::width(text));
        spans.push(Span::styled(format!(" {text}{} ", " ".repeat(pad)), style));
    }
    Line::from(spans)
}
