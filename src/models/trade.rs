//! Trade message models.

use rust_decimal::Decimal;
use serde::Deserialize;

/// A completed match between two orders.
#[derive(Debug, Clone, Deserialize)]
pub struct TradeUpdate {
    pub trade_id: u64,
    /// Server-side execution timestamp, passed through for display.
    pub trade_time: String,
    /// Side of the initiating order, `"bid"` or `"ask"`.
    pub trade_type: String,
    pub price: Decimal,
    pub amount: Decimal,
    /// Order that triggered the match.
    pub initiating_id: u64,
    /// Resting order it matched against.
    pub existing_id: u64,
}
