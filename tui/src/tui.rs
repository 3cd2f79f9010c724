use std::io::BufWriter;
use std::io::Result;
use std::io::Stdout;
use std::io::stdout;

use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// A type alias for the terminal type used in this application.
pub type Tui = Terminal<CrosstermBackend<BufWriter<Stdout>>>;

/// Initialize the terminal: alternate screen, raw mode, bracketed paste.
pub fn init() -> Result<Tui> {
    execute!(stdout(), EnableBracketedPaste)?;
    execute!(stdout(), EnterAlternateScreen)?;
    enable_raw_mode()?;
    execute!(stdout(), crossterm::terminal::SetTitle("widd"))?;

    // Wrap stdout in a BufWriter to reduce syscalls during rendering.
    let backend = CrosstermBackend::new(BufWriter::new(stdout()));
    let mut tui = Terminal::new(backend)?;
    tui.clear()?;
    Ok(tui)
}

/// Restore the terminal to its original state.
pub fn restore() -> Result<()> {
    execute!(stdout(), DisableBracketedPaste)?;
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}
