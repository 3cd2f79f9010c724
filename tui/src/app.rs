use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::sync::mpsc::RecvTimeoutError;
use std::sync::mpsc::Sender;
use std::sync::mpsc::channel;
use std::time::Duration;

use crossterm::event::Event;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use ratatui::Frame;
use widd_core::config::Config;
use widd_core::webhook::WebhookClient;

use crate::app_event::AppEvent;
use crate::auth::AuthOutcome;
use crate::auth::AuthScreen;
use crate::chatwidget::ChatWidget;
use crate::tui::Tui;

/// Redraw cadence while the thinking indicator is animating.
const ANIMATION_TICK: Duration = Duration::from_millis(120);

pub struct App {
    client: Arc<WebhookClient>,
    chat: ChatWidget,
    /// `Some` until the access code has been entered (or auth is disabled).
    auth: Option<AuthScreen>,
    app_event_tx: Sender<AppEvent>,
    app_event_rx: Receiver<AppEvent>,
    runtime: tokio::runtime::Handle,
}

impl App {
    pub fn new(config: Config) -> Self {
        let (app_event_tx, app_event_rx) = channel();
        spawn_input_thread(app_event_tx.clone());

        let auth = config.access_code.clone().map(AuthScreen::new);
        Self {
            client: Arc::new(WebhookClient::new(&config)),
            chat: ChatWidget::new(),
            auth,
            app_event_tx,
            app_event_rx,
            runtime: tokio::runtime::Handle::current(),
        }
    }

    pub fn run(&mut self, terminal: &mut Tui) -> color_eyre::Result<()> {
        loop {
            terminal.draw(|frame| self.draw(frame))?;

            // Poll with a timeout while the spinner is animating, otherwise
            // block until something happens.
            let event = if self.chat.is_waiting() {
                match self.app_event_rx.recv_timeout(ANIMATION_TICK) {
                    Ok(event) => event,
                    Err(RecvTimeoutError::Timeout) => continue,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            } else {
                match self.app_event_rx.recv() {
                    Ok(event) => event,
                    Err(_) => break,
                }
            };

            match event {
                AppEvent::Key(key) => {
                    if self.handle_key(key) {
                        break;
                    }
                }
                AppEvent::Paste(pasted) => {
                    if self.auth.is_none() {
                        self.chat.handle_paste(pasted);
                    }
                }
                AppEvent::Resize => {}
                AppEvent::Response(text) => {
                    tracing::debug!("webhook response: {} bytes", text.len());
                    self.chat.on_response(&text);
                }
            }
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        self.chat.render(frame);
        if let Some(auth) = &self.auth {
            auth.render(frame);
        }
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
            && self.auth.is_none()
        {
            return true;
        }

        if let Some(auth) = &mut self.auth {
            match auth.handle_key(key) {
                AuthOutcome::Continue => {}
                AuthOutcome::Authenticated => self.auth = None,
                AuthOutcome::Cancelled => return true,
            }
            return false;
        }

        if let Some(message) = self.chat.handle_key(key) {
            self.dispatch(message);
        }
        false
    }

    fn dispatch(&self, message: String) {
        tracing::info!("sending message ({} chars)", message.chars().count());
        let client = self.client.clone();
        let tx = self.app_event_tx.clone();
        self.runtime.spawn(async move {
            let text = match client.send(&message).await {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!("webhook request failed: {err}");
                    // Error text takes the same formatting path as responses.
                    format!("Error: {err}")
                }
            };
            let _ = tx.send(AppEvent::Response(text));
        });
    }
}

/// Forward terminal input to the app channel from a dedicated thread, so the
/// main loop can block on a single receiver.
fn spawn_input_thread(tx: Sender<AppEvent>) {
    std::thread::spawn(move || {
        loop {
            let event = match crossterm::event::read() {
                Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => AppEvent::Key(key),
                Ok(Event::Paste(pasted)) => AppEvent::Paste(pasted),
                Ok(Event::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::error!("input thread stopped: {err}");
                    break;
                }
            };
            if tx.send(event).is_err() {
                break;
            }
        }
    });
}
