//! WebSocket connection lifecycle management.
//!
//! [`ConnectionManager`] handles connecting, reading frames, and
//! automatic reconnection with exponential backoff. There is no
//! resynchronization on reconnect: the server sends no snapshot, so the
//! view stays as-is until fresh deltas arrive.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tungstenite::Message as WsMessage;

use super::{WsWriter, connect};
use crate::tui::Message;

/// Initial backoff duration between reconnection attempts.
const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Maximum backoff duration between reconnection attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Why the reader loop exited.
enum DisconnectReason {
    /// The connection was lost or errored.
    ConnectionError,
    /// The message channel to the main loop was closed (app shutting down).
    Shutdown,
}

/// Manages the feed connection including reconnection with exponential
/// backoff, forwarding every text frame to the main loop.
pub struct ConnectionManager {
    url: String,
    tx: mpsc::UnboundedSender<Message>,
}

impl ConnectionManager {
    /// Creates a new connection manager for the given feed URL.
    #[must_use]
    pub fn new(url: String, tx: mpsc::UnboundedSender<Message>) -> Self {
        Self { url, tx }
    }

    /// Runs the connection manager loop indefinitely.
    ///
    /// Connects to the feed, forwards frames, and automatically
    /// reconnects with exponential backoff on disconnection. Returns
    /// when the main loop drops its receiver.
    pub async fn run(self) {
        let mut backoff = INITIAL_BACKOFF;
        let mut first_attempt = true;

        loop {
            if !first_attempt {
                let _ = self.tx.send(Message::Reconnecting);
            }
            first_attempt = false;

            info!(url = %self.url, "Connecting to feed");
            let (write, read) = match connect(&self.url).await {
                Ok(pair) => pair,
                Err(e) => {
                    error!("Connection failed: {e}");
                    let _ = self.tx.send(Message::Disconnected);
                    info!(backoff_secs = backoff.as_secs(), "Backing off before retry");
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                    continue;
                }
            };

            let _ = self.tx.send(Message::Connected);
            info!("Feed connected");

            // Reset backoff on successful connection
            backoff = INITIAL_BACKOFF;

            match self.read_loop(write, read).await {
                DisconnectReason::ConnectionError => {
                    let _ = self.tx.send(Message::Disconnected);
                    info!(
                        backoff_secs = backoff.as_secs(),
                        "Connection lost, backing off"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
                DisconnectReason::Shutdown => {
                    info!("Connection manager shutting down");
                    return;
                }
            }
        }
    }

    /// Reads frames from the feed until disconnection or shutdown.
    ///
    /// The write half is held only to keep the stream open; the feed
    /// protocol never requires us to send.
    async fn read_loop(&self, _write: WsWriter, mut read: super::WsReader) -> DisconnectReason {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(WsMessage::Text(text)) => {
                    if self.tx.send(Message::Frame(text.to_string())).is_err() {
                        return DisconnectReason::Shutdown;
                    }
                }
                Ok(_) => {} // Binary/Ping/Pong/Close frames
                Err(e) => {
                    warn!("WebSocket error: {e}");
                    return DisconnectReason::ConnectionError;
                }
            }
        }

        warn!("WebSocket stream ended");
        DisconnectReason::ConnectionError
    }
}
