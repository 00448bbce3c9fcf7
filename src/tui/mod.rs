//! Terminal user interface for the order-book viewer.
//!
//! A Ratatui surface that consumes the view's render operations and
//! draws the bid/ask tables, trade history, and balances.

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
