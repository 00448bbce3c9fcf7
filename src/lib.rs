//! Streaming order-book viewer.
//!
//! Connects to an exchange's per-pair WebSocket feed, consumes order,
//! trade, and balance delta messages, and keeps a sorted in-memory book
//! in sync. The [`view::OrderBookView`] core turns each message into a
//! list of [`view::RenderOp`]s which the terminal UI applies to its
//! rendered surface.

pub mod config;
pub mod error;
pub mod models;
pub mod tui;
pub mod view;
pub mod websocket;

pub use error::{DepthviewError, Result};
