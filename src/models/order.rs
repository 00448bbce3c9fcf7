//! Order message models.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl Side {
    /// Returns the wire-format side name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Bid => "bid",
            Side::Ask => "ask",
        }
    }
}

/// Lifecycle state of an order.
///
/// `Partial` means the order has traded against something but still has
/// amount resting; it stays on the book like `Open`. `Complete` and
/// `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderState {
    Open,
    Partial,
    Complete,
    Cancelled,
}

impl OrderState {
    /// Whether this state removes the order from the book.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderState::Complete | OrderState::Cancelled)
    }
}

/// An order delta from the feed.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderUpdate {
    pub order_id: u64,
    pub order_type: Side,
    pub price: Decimal,
    pub amount: Decimal,
    pub state: OrderState,
}

impl OrderUpdate {
    /// Whether this message means the order leaves (or never enters)
    /// the book: amount exhausted or terminal state.
    pub fn is_removal(&self) -> bool {
        self.amount.is_zero() || self.state.is_terminal()
    }
}
