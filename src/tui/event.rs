//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tracing::warn;

use super::app::{App, ConnectionStatus};
use crate::view::OrderBookView;

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),

    /// Raw text frame from the feed.
    Frame(String),

    /// WebSocket connected.
    Connected,
    /// WebSocket disconnected.
    Disconnected,
    /// WebSocket reconnecting.
    Reconnecting,
}

/// Spawns a task that polls for terminal events and sends them to a channel.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::spawn(async move {
        loop {
            // Poll for events with a 50ms timeout
            match tokio::task::spawn_blocking(|| {
                if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                    event::read().ok()
                } else {
                    None
                }
            })
            .await
            {
                Ok(Some(CrosstermEvent::Key(key))) => {
                    if tx.send(Message::Input(Event::Key(key))).is_err() {
                        break;
                    }
                }
                Ok(Some(CrosstermEvent::Resize(w, h))) => {
                    if tx.send(Message::Input(Event::Resize(w, h))).is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(_) => break,
            }
        }
    });
}

/// Spawns a task that sends periodic tick events.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        loop {
            interval.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
///
/// Feed frames go through the view; a malformed frame is logged and
/// discarded without touching the model or the surface.
pub fn update(app: &mut App, view: &mut OrderBookView, message: Message) {
    match message {
        Message::Input(event) => handle_input(app, &event),
        Message::Frame(text) => match view.apply_text(&text) {
            Ok(ops) => app.apply_ops(&ops),
            Err(e) => warn!("discarding feed frame: {e}"),
        },
        Message::Connected => app.connection_status = ConnectionStatus::Connected,
        Message::Disconnected => app.connection_status = ConnectionStatus::Disconnected,
        Message::Reconnecting => app.connection_status = ConnectionStatus::Reconnecting,
    }
}

fn handle_input(app: &mut App, event: &Event) {
    if let Event::Key(key) = event {
        let ctrl_c =
            key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl_c || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            app.should_quit = true;
        }
    }
}
