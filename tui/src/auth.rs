use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Block as WidgetBlock;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Clear;
use ratatui::widgets::Paragraph;

const PROMPT: &str = "Please enter the password to access the chat";
const WRONG_CODE: &str = "Incorrect password. Please try again.";

/// What the app loop should do after the auth screen handled a key.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthOutcome {
    Continue,
    Authenticated,
    Cancelled,
}

/// Modal access-code prompt shown before the chat is usable.
pub struct AuthScreen {
    access_code: String,
    input: String,
    error: Option<&'static str>,
}

impl AuthScreen {
    pub fn new(access_code: String) -> Self {
        Self {
            access_code,
            input: String::new(),
            error: None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AuthOutcome {
        match key.code {
            KeyCode::Esc => return AuthOutcome::Cancelled,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return AuthOutcome::Cancelled;
            }
            KeyCode::Enter => {
                if self.input == self.access_code {
                    return AuthOutcome::Authenticated;
                }
                self.input.clear();
                self.error = Some(WRONG_CODE);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.error = None;
            }
            _ => {}
        }
        AuthOutcome::Continue
    }

    pub fn render(&self, frame: &mut Frame<'_>) {
        let area = centered_box(frame.area(), 48, 7);
        frame.render_widget(Clear, area);

        let masked: String = "•".repeat(self.input.chars().count());
        let mut lines = vec![
            Line::from(PROMPT),
            Line::from(Span::styled(
                format!("> {masked}"),
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        match self.error {
            Some(error) => lines.push(Line::from(Span::styled(
                error,
                Style::default().fg(Color::Red),
            ))),
            None => lines.push(Line::from(Span::styled(
                "Enter to submit, Esc to quit",
                Style::default().fg(Color::DarkGray),
            ))),
        }

        let widget = Paragraph::new(lines).alignment(Alignment::Center).block(
            WidgetBlock::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Security Check ")
                .title_alignment(Alignment::Center),
        );
        frame.render_widget(widget, area);
    }
}

fn centered_box(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
