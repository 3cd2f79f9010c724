use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::text::Text;
use ratatui::widgets::Block as WidgetBlock;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Wrap;
use widd_core::format::Block;
use widd_core::format::format_response;

use crate::block_render::render_blocks;
use crate::thinking::ThinkingState;

#[derive(Debug)]
enum Message {
    User(String),
    Assistant(Vec<Block>),
}

/// Conversation history plus the composer. Owns scroll state; the [`App`]
/// loop feeds it key and response events.
///
/// [`App`]: crate::app::App
pub struct ChatWidget {
    messages: Vec<Message>,
    composer: String,
    waiting: Option<ThinkingState>,
    /// Rows between the bottom of the wrapped history and the bottom of the
    /// viewport. Zero means pinned to the latest content.
    scroll_from_bottom: usize,
    /// Height of the history viewport at the last render, for page scrolls.
    last_viewport_rows: usize,
}

impl ChatWidget {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            composer: String::new(),
            waiting: None,
            scroll_from_bottom: 0,
            last_viewport_rows: 0,
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting.is_some()
    }

    /// Handle a key event. Returns the composed message when the user
    /// submitted one.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<String> {
        match key.code {
            KeyCode::Enter => return self.submit(),
            KeyCode::Backspace => {
                self.composer.pop();
            }
            KeyCode::Char(c) => {
                self.composer.push(c);
            }
            KeyCode::Up => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(1);
            }
            KeyCode::Down => {
                self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(1);
            }
            KeyCode::PageUp => {
                self.scroll_from_bottom = self
                    .scroll_from_bottom
                    .saturating_add(self.last_viewport_rows.max(1));
            }
            KeyCode::PageDown => {
                self.scroll_from_bottom = self
                    .scroll_from_bottom
                    .saturating_sub(self.last_viewport_rows.max(1));
            }
            KeyCode::Esc => {
                self.scroll_from_bottom = 0;
            }
            _ => {}
        }
        None
    }

    pub fn handle_paste(&mut self, pasted: String) {
        // Pasted newlines would submit mid-paste; flatten them.
        self.composer.push_str(&pasted.replace('\n', " "));
    }

    /// A webhook round trip finished. Error text arrives here too and runs
    /// through the same formatting pipeline as normal responses.
    pub fn on_response(&mut self, text: &str) {
        self.waiting = None;
        self.messages.push(Message::Assistant(format_response(text)));
        self.scroll_from_bottom = 0;
    }

    fn submit(&mut self) -> Option<String> {
        if self.waiting.is_some() {
            return None;
        }
        let message = self.composer.trim().to_string();
        if message.is_empty() {
            return None;
        }
        self.composer.clear();
        self.messages.push(Message::User(message.clone()));
        self.waiting = Some(ThinkingState::new());
        self.scroll_from_bottom = 0;
        Some(message)
    }

    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let [history_area, composer_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).areas(frame.area());
        self.render_history(frame, history_area);
        self.render_composer(frame, composer_area);
    }

    fn render_history(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let mut lines: Vec<Line<'static>> = Vec::new();
        for message in &self.messages {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            match message {
                Message::User(text) => lines.push(Line::from(vec![
                    Span::styled("› ", Style::default().fg(Color::Cyan)),
                    Span::styled(
                        text.clone(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])),
                Message::Assistant(blocks) => lines.extend(render_blocks(blocks)),
            }
        }
        if let Some(thinking) = &self.waiting {
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(thinking.status_line());
        }

        let paragraph = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
        let viewport_rows = area.height as usize;
        self.last_viewport_rows = viewport_rows;

        let wrapped_rows = paragraph.line_count(area.width);
        let max_offset = wrapped_rows.saturating_sub(viewport_rows);
        self.scroll_from_bottom = self.scroll_from_bottom.min(max_offset);
        let scroll_top = max_offset - self.scroll_from_bottom;

        frame.render_widget(paragraph.scroll((scroll_top as u16, 0)), area);

        if self.scroll_from_bottom > 0 && area.height > 0 {
            let hint = format!(" ↓ {} more line(s) below ", self.scroll_from_bottom);
            let hint_area = Rect {
                x: area.x,
                y: area.y + area.height - 1,
                width: area.width,
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    hint,
                    Style::default().fg(Color::DarkGray),
                ))),
                hint_area,
            );
        }
    }

    fn render_composer(&self, frame: &mut Frame<'_>, area: Rect) {
        let title = if self.waiting.is_some() {
            " Waiting for response… "
        } else {
            " Message (Enter to send, Ctrl+C to quit) "
        };
        let block = WidgetBlock::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(
            Paragraph::new(self.composer.as_str()).block(block),
            area,
        );

        if self.waiting.is_none() {
            // Put the cursor after the composed text, clamped to the box.
            let x = inner
                .x
                .saturating_add(self.composer.chars().count() as u16)
                .min(inner.x + inner.width.saturating_sub(1));
            frame.set_cursor_position((x, inner.y));
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(chat: &mut ChatWidget, text: &str) {
        for c in text.chars() {
            chat.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn enter_submits_the_composed_message() {
        let mut chat = ChatWidget::new();
        type_text(&mut chat, "total sales by country");
        let submitted = chat.handle_key(key(KeyCode::Enter));
        assert_eq!(submitted, Some("total sales by country".to_string()));
        assert!(chat.is_waiting());
        assert!(chat.composer.is_empty());
    }

    #[test]
    fn empty_composer_does_not_submit() {
        let mut chat = ChatWidget::new();
        type_text(&mut chat, "   ");
        assert_eq!(chat.handle_key(key(KeyCode::Enter)), None);
        assert!(!chat.is_waiting());
    }

    #[test]
    fn submit_is_blocked_while_waiting() {
        let mut chat = ChatWidget::new();
        type_text(&mut chat, "first");
        chat.handle_key(key(KeyCode::Enter));
        type_text(&mut chat, "second");
        assert_eq!(chat.handle_key(key(KeyCode::Enter)), None);

        // The reply unblocks the composer.
        chat.on_response("done");
        assert_eq!(chat.handle_key(key(KeyCode::Enter)), Some("second".to_string()));
    }

    #[test]
    fn response_clears_waiting_and_appends_blocks() {
        let mut chat = ChatWidget::new();
        type_text(&mut chat, "hi");
        chat.handle_key(key(KeyCode::Enter));
        chat.on_response("Sales increased by 20%");
        assert!(!chat.is_waiting());
        assert_eq!(chat.messages.len(), 2);
        assert!(matches!(&chat.messages[1], Message::Assistant(blocks) if blocks.len() == 1));
    }

    #[test]
    fn pasted_newlines_are_flattened() {
        let mut chat = ChatWidget::new();
        chat.handle_paste("line one\nline two".to_string());
        assert_eq!(chat.composer, "line one line two");
    }

    #[test]
    fn scroll_offset_clamps_to_history_height() {
        let mut chat = ChatWidget::new();
        chat.on_response("one\ntwo\nthree");
        for _ in 0..100 {
            chat.handle_key(key(KeyCode::Up));
        }
        let backend = TestBackend::new(40, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| chat.render(frame)).unwrap();
        // Three rendered lines fit in the viewport, so no scrollback exists.
        assert_eq!(chat.scroll_from_bottom, 0);
    }

    #[test]
    fn render_smoke_test() {
        let mut chat = ChatWidget::new();
        type_text(&mut chat, "report");
        chat.handle_key(key(KeyCode::Enter));
        chat.on_response("Country | Sales\nIraq | 1,200,000 IQD\nIran | 800,000 IQD");
        let backend = TestBackend::new(60, 16);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| chat.render(frame)).unwrap();
    }
}
