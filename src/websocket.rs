//! Async WebSocket client for the exchange feed.
//!
//! The feed has no application-level handshake: connecting to the
//! per-pair URL is the whole subscription, and the server starts
//! pushing order/trade/balance frames immediately.

use futures_util::StreamExt;
use futures_util::stream::{SplitSink, SplitStream};
use tokio::net::TcpStream;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::info;

use crate::Result;

pub mod connection;

pub use connection::ConnectionManager;

/// Write half of a feed connection.
pub type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, tungstenite::Message>;

/// Read half of a feed connection.
pub type WsReader = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Establishes a WebSocket connection to the given feed URL.
///
/// # Errors
///
/// Returns a [`DepthviewError`](crate::DepthviewError) if the connection
/// or TLS handshake fails.
pub async fn connect(url: &str) -> Result<(WsWriter, WsReader)> {
    let (ws_stream, _) = connect_async(url).await?;
    info!("WebSocket handshake completed");

    Ok(ws_stream.split())
}
