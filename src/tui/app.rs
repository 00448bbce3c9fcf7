//! Application state for the TUI.
//!
//! [`App`] is the rendered surface: ordered row grids for the three
//! regions plus per-currency balance cells. It knows nothing about the
//! feed protocol — it only consumes [`RenderOp`]s, so it stays faithful
//! to whatever the view decided.

use std::time::{Duration, Instant};

use crate::view::{Region, RenderOp, RowPosition};

/// How long a flashed row or cell stays highlighted.
const FLASH_DURATION: Duration = Duration::from_millis(300);

/// Column order of an order row: id, price, amount, total.
const ORDER_FIELDS: [&str; 4] = ["id", "price", "amount", "total"];

/// WebSocket connection status shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connecting,
    Connected,
    Disconnected,
    Reconnecting,
}

impl ConnectionStatus {
    /// Header label for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Reconnecting => "reconnecting",
        }
    }
}

/// One rendered row in a region.
#[derive(Debug, Clone)]
pub struct RenderedRow {
    pub key: String,
    pub cells: Vec<String>,
    flash_until: Option<Instant>,
}

impl RenderedRow {
    /// Whether the row is currently highlighted.
    pub fn is_flashing(&self) -> bool {
        self.flash_until.is_some_and(|t| Instant::now() < t)
    }
}

/// One rendered balance cell.
#[derive(Debug, Clone)]
pub struct BalanceCell {
    pub currency: String,
    pub text: String,
    flash_until: Option<Instant>,
}

impl BalanceCell {
    /// Whether the cell is currently highlighted.
    pub fn is_flashing(&self) -> bool {
        self.flash_until.is_some_and(|t| Instant::now() < t)
    }
}

/// Central application state container.
pub struct App {
    /// Pair label shown in the header, e.g. `BTC/USD`.
    pub pair_label: String,
    /// Resting bids, best first.
    pub bid_rows: Vec<RenderedRow>,
    /// Resting asks, best first.
    pub ask_rows: Vec<RenderedRow>,
    /// Trade history, most recent first.
    pub trade_rows: Vec<RenderedRow>,
    /// Balance cells in first-seen order.
    pub balances: Vec<BalanceCell>,
    /// WebSocket connection status.
    pub connection_status: ConnectionStatus,
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates an empty surface for the given pair.
    #[must_use]
    pub fn new(pair_label: String) -> Self {
        Self {
            pair_label,
            bid_rows: Vec::new(),
            ask_rows: Vec::new(),
            trade_rows: Vec::new(),
            balances: Vec::new(),
            connection_status: ConnectionStatus::Connecting,
            should_quit: false,
        }
    }

    /// Applies a batch of render operations to the surface.
    pub fn apply_ops(&mut self, ops: &[RenderOp]) {
        for op in ops {
            self.apply_op(op);
        }
    }

    fn apply_op(&mut self, op: &RenderOp) {
        match op {
            RenderOp::InsertRow {
                region,
                key,
                cells,
                position,
            } => {
                let rows = self.region_mut(*region);
                let row = RenderedRow {
                    key: key.clone(),
                    cells: cells.clone(),
                    flash_until: None,
                };
                match position {
                    RowPosition::Top => rows.insert(0, row),
                    RowPosition::Append => rows.push(row),
                    RowPosition::Before(anchor) => {
                        match rows.iter().position(|r| &r.key == anchor) {
                            Some(index) => rows.insert(index, row),
                            None => rows.push(row),
                        }
                    }
                }
            }
            RenderOp::UpdateCell { key, text } => self.update_cell(key, text),
            RenderOp::RemoveRow { region, key } => {
                self.region_mut(*region).retain(|r| &r.key != key);
            }
            RenderOp::Flash { key } => self.flash(key),
        }
    }

    /// Routes a cell update by its stable key: `<currency>_balance` or
    /// `order_<id>_<field>`.
    fn update_cell(&mut self, key: &str, text: &str) {
        if let Some(currency) = key.strip_suffix("_balance") {
            match self.balances.iter_mut().find(|b| b.currency == currency) {
                Some(cell) => cell.text = text.to_string(),
                None => self.balances.push(BalanceCell {
                    currency: currency.to_string(),
                    text: text.to_string(),
                    flash_until: None,
                }),
            }
            return;
        }

        if let Some((row_key, field)) = split_order_cell_key(key) {
            let Some(column) = ORDER_FIELDS.iter().position(|f| *f == field) else {
                return;
            };
            for rows in [&mut self.bid_rows, &mut self.ask_rows] {
                if let Some(row) = rows.iter_mut().find(|r| r.key == row_key) {
                    if let Some(cell) = row.cells.get_mut(column) {
                        *cell = text.to_string();
                    }
                    return;
                }
            }
        }
    }

    /// Highlights whatever the key addresses: a row, an order cell's
    /// row, or a balance cell.
    fn flash(&mut self, key: &str) {
        let until = Instant::now() + FLASH_DURATION;

        if let Some(currency) = key.strip_suffix("_balance") {
            if let Some(cell) = self.balances.iter_mut().find(|b| b.currency == currency) {
                cell.flash_until = Some(until);
            }
            return;
        }

        let row_key = match split_order_cell_key(key) {
            Some((row_key, _)) => row_key,
            None => key.to_string(),
        };
        for rows in [
            &mut self.bid_rows,
            &mut self.ask_rows,
            &mut self.trade_rows,
        ] {
            if let Some(row) = rows.iter_mut().find(|r| r.key == row_key) {
                row.flash_until = Some(until);
                return;
            }
        }
    }

    fn region_mut(&mut self, region: Region) -> &mut Vec<RenderedRow> {
        match region {
            Region::BidOrders => &mut self.bid_rows,
            Region::AskOrders => &mut self.ask_rows,
            Region::Trades => &mut self.trade_rows,
        }
    }
}

/// Splits `order_<id>_<field>` into (`order_<id>`, `<field>`).
///
/// Returns `None` for plain row keys like `order_7` or `trade_3`.
fn split_order_cell_key(key: &str) -> Option<(String, String)> {
    let rest = key.strip_prefix("order_")?;
    let (id, field) = rest.split_once('_')?;
    Some((format!("order_{id}"), field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Region;

    fn insert(region: Region, key: &str, cells: &[&str], position: RowPosition) -> RenderOp {
        RenderOp::InsertRow {
            region,
            key: key.to_string(),
            cells: cells.iter().map(|c| (*c).to_string()).collect(),
            position,
        }
    }

    #[test]
    fn insert_before_lands_ahead_of_anchor() {
        let mut app = App::new("BTC/USD".to_string());
        app.apply_ops(&[
            insert(
                Region::AskOrders,
                "order_1",
                &["1", "10.0000", "1.0000", "10.0000"],
                RowPosition::Append,
            ),
            insert(
                Region::AskOrders,
                "order_2",
                &["2", "9.0000", "1.0000", "9.0000"],
                RowPosition::Before("order_1".to_string()),
            ),
        ]);

        let keys: Vec<&str> = app.ask_rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["order_2", "order_1"]);
    }

    #[test]
    fn update_cell_targets_the_right_column() {
        let mut app = App::new("BTC/USD".to_string());
        app.apply_ops(&[insert(
            Region::BidOrders,
            "order_5",
            &["5", "10.0000", "2.0000", "20.0000"],
            RowPosition::Append,
        )]);
        app.apply_ops(&[RenderOp::UpdateCell {
            key: "order_5_amount".to_string(),
            text: "1.5000".to_string(),
        }]);

        assert_eq!(app.bid_rows[0].cells[2], "1.5000");
        assert_eq!(app.bid_rows[0].cells[1], "10.0000");
    }

    #[test]
    fn remove_row_deletes_by_key() {
        let mut app = App::new("BTC/USD".to_string());
        app.apply_ops(&[insert(
            Region::Trades,
            "trade_1",
            &["t", "bid", "1.0000", "1.0000", "1.0000", "1", "2"],
            RowPosition::Top,
        )]);
        app.apply_ops(&[RenderOp::RemoveRow {
            region: Region::Trades,
            key: "trade_1".to_string(),
        }]);

        assert!(app.trade_rows.is_empty());
    }

    #[test]
    fn balance_update_creates_then_overwrites() {
        let mut app = App::new("BTC/USD".to_string());
        app.apply_ops(&[RenderOp::UpdateCell {
            key: "btc_balance".to_string(),
            text: "1.0000".to_string(),
        }]);
        app.apply_ops(&[RenderOp::UpdateCell {
            key: "btc_balance".to_string(),
            text: "0.5000".to_string(),
        }]);

        assert_eq!(app.balances.len(), 1);
        assert_eq!(app.balances[0].text, "0.5000");
    }
}
