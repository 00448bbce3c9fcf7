//! Render operation vocabulary.
//!
//! The view never touches the screen; it emits [`RenderOp`]s describing
//! the minimal surface mutation, and a renderer (the TUI, a test
//! harness) applies them. Rows and cells are addressed by the stable
//! string keys the feed protocol implies: `order_<id>`, `trade_<id>`,
//! `<currency>_balance`.

/// A named region of the rendered surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    BidOrders,
    AskOrders,
    Trades,
}

impl Region {
    /// Returns the region's surface identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::BidOrders => "bid_orders",
            Region::AskOrders => "ask_orders",
            Region::Trades => "trades",
        }
    }
}

/// Where an inserted row lands within its region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPosition {
    /// Before the row with the given key.
    Before(String),
    /// After the last existing row.
    Append,
    /// Before the first existing row.
    Top,
}

/// One surface mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOp {
    InsertRow {
        region: Region,
        key: String,
        cells: Vec<String>,
        position: RowPosition,
    },
    UpdateCell {
        key: String,
        text: String,
    },
    RemoveRow {
        region: Region,
        key: String,
    },
    /// Decorative attention hint for a row or cell; renderers may ignore it.
    Flash {
        key: String,
    },
}

/// Row key for an order, `order_<id>`.
pub fn order_row_key(order_id: u64) -> String {
    format!("order_{order_id}")
}

/// Cell key for an order field, `order_<id>_<field>`.
pub fn order_cell_key(order_id: u64, field: &str) -> String {
    format!("order_{order_id}_{field}")
}

/// Row key for a trade, `trade_<id>`.
pub fn trade_row_key(trade_id: u64) -> String {
    format!("trade_{trade_id}")
}

/// Cell key for a currency balance, `<currency>_balance`.
pub fn balance_cell_key(currency: &str) -> String {
    format!("{currency}_balance")
}
