use crossterm::event::KeyEvent;

/// Events handled by the [`crate::app::App`] loop. Input events come from a
/// dedicated reader thread; `Response` comes from the webhook task.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    Resize,
    /// The in-flight webhook request finished. Failures arrive here too,
    /// already reduced to user-visible `Error: ...` text; the chat widget
    /// runs both through the same formatting pipeline.
    Response(String),
}
