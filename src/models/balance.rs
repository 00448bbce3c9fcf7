//! Balance message models.

use rust_decimal::Decimal;
use serde::Deserialize;

/// A per-currency balance overwrite. Last write wins.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceUpdate {
    /// Currency code, e.g. `"btc"`.
    pub currency: String,
    pub balance: Decimal,
}
