use std::time::Duration;
use std::time::Instant;

use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

/// Two-frame diamond pulse shown while a request is in flight.
const FRAMES: [&str; 2] = ["◇", "◆"];
const FRAME_INTERVAL_MS: u128 = 500;

/// Topics the assistant is "thinking about", rotated under the spinner.
const TAGS: [&str; 3] = ["Sales Data", "Statistics", "Regional Data"];
const TAG_INTERVAL_MS: u128 = 1500;

/// Animation state for the in-flight indicator. Everything derives from the
/// elapsed time so redraws stay idempotent.
#[derive(Debug)]
pub struct ThinkingState {
    started: Instant,
}

impl ThinkingState {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn status_line(&self) -> Line<'static> {
        status_line_at(self.started.elapsed())
    }
}

fn status_line_at(elapsed: Duration) -> Line<'static> {
    let millis = elapsed.as_millis();
    let frame = FRAMES[(millis / FRAME_INTERVAL_MS) as usize % FRAMES.len()];
    let tag = TAGS[(millis / TAG_INTERVAL_MS) as usize % TAGS.len()];
    Line::from(vec![
        Span::styled(
            format!("{frame} Thinking… "),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            tag.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::ITALIC),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flatten(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.clone()).collect()
    }

    #[test]
    fn frames_alternate_every_half_second() {
        let first = flatten(&status_line_at(Duration::from_millis(0)));
        let second = flatten(&status_line_at(Duration::from_millis(600)));
        assert!(first.starts_with('◇'));
        assert!(second.starts_with('◆'));
    }

    #[test]
    fn tags_rotate_through_all_topics() {
        let tags: Vec<String> = (0..3)
            .map(|i| {
                let line = status_line_at(Duration::from_millis(i * 1500));
                line.spans
                    .last()
                    .map(|s| s.content.to_string())
                    .unwrap_or_default()
            })
            .collect();
        assert_eq!(tags, vec!["Sales Data", "Statistics", "Regional Data"]);
    }

    #[test]
    fn rotation_wraps_back_to_the_first_tag() {
        let line = status_line_at(Duration::from_millis(3 * 1500));
        assert_eq!(
            line.spans.last().map(|s| s.content.to_string()),
            Some("Sales Data".to_string())
        );
    }
}
