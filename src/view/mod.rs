//! Incremental order-book view synchronizer.
//!
//! [`OrderBookView`] consumes one feed message at a time, mutates its
//! in-memory model (sorted bids and asks, bounded trade history, balance
//! map), and returns the [`RenderOp`]s that reconcile a rendered surface
//! with the new state. Processing is strictly one message to completion
//! before the next; the view holds no locks and does no IO.

pub mod ops;

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{debug, warn};

use crate::models::{BalanceUpdate, FeedMessage, OrderUpdate, Side, TradeUpdate};
pub use ops::{Region, RenderOp, RowPosition};
use ops::{balance_cell_key, order_cell_key, order_row_key, trade_row_key};

/// Trade history retention bound when none is configured.
pub const DEFAULT_TRADE_CAPACITY: usize = 200;

/// Display and comparison scale for prices, amounts, and totals.
const DISPLAY_SCALE: u32 = 4;

/// An order resting on one side of the book.
///
/// Price and amount are stored already rounded to display scale; sort
/// comparisons happen on these rounded values so the model and the
/// surface can never disagree about ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEntry {
    pub order_id: u64,
    pub price: Decimal,
    pub amount: Decimal,
}

impl BookEntry {
    /// Resting value of the entry, `amount × price` at display scale.
    pub fn total(&self) -> Decimal {
        round_display(self.amount * self.price)
    }
}

/// One row of the trade history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeRecord {
    pub trade_id: u64,
    pub trade_time: String,
    pub trade_type: String,
    pub price: Decimal,
    pub amount: Decimal,
    pub initiating_id: u64,
    pub existing_id: u64,
}

impl TradeRecord {
    /// Traded value, `amount × price` at display scale.
    pub fn total(&self) -> Decimal {
        round_display(self.amount * self.price)
    }
}

/// Rounds to display scale, half away from zero.
fn round_display(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a decimal with exactly four fractional digits.
pub fn format_display(value: Decimal) -> String {
    format!("{:.4}", round_display(value))
}

/// In-memory mirror of the rendered order book, trade history, and
/// balances for a single trading pair.
pub struct OrderBookView {
    /// Bids, best (highest price) first.
    bids: Vec<BookEntry>,
    /// Asks, best (lowest price) first.
    asks: Vec<BookEntry>,
    /// Unified order-id key space: which side each resting order is on.
    sides: HashMap<u64, Side>,
    /// Trade history, most recent at the front.
    trades: VecDeque<TradeRecord>,
    /// Trade ids ever observed, for idempotent insert.
    seen_trades: HashSet<u64>,
    balances: BTreeMap<String, Decimal>,
    trade_capacity: usize,
}

impl Default for OrderBookView {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderBookView {
    /// Creates an empty view with the default trade retention bound.
    #[must_use]
    pub fn new() -> Self {
        Self::with_trade_capacity(DEFAULT_TRADE_CAPACITY)
    }

    /// Creates an empty view retaining at most `trade_capacity` trades.
    #[must_use]
    pub fn with_trade_capacity(trade_capacity: usize) -> Self {
        Self {
            bids: Vec::new(),
            asks: Vec::new(),
            sides: HashMap::new(),
            trades: VecDeque::new(),
            seen_trades: HashSet::new(),
            balances: BTreeMap::new(),
            trade_capacity: trade_capacity.max(1),
        }
    }

    /// Parses a raw feed frame and applies it.
    ///
    /// # Errors
    ///
    /// Returns [`DepthviewError::MalformedMessage`](crate::DepthviewError::MalformedMessage)
    /// if the frame cannot be decoded; the model is left untouched in
    /// that case.
    pub fn apply_text(&mut self, text: &str) -> crate::Result<Vec<RenderOp>> {
        let message = FeedMessage::parse(text)?;
        Ok(self.apply(message))
    }

    /// Applies one decoded message and returns the surface reconciliation.
    pub fn apply(&mut self, message: FeedMessage) -> Vec<RenderOp> {
        match message {
            FeedMessage::Order(update) => self.apply_order(&update),
            FeedMessage::Trade(update) => self.apply_trade(update),
            FeedMessage::Balance(update) => self.apply_balance(&update),
            FeedMessage::Unknown { message_type } => {
                warn!(message_type, "ignoring unknown message type");
                Vec::new()
            }
        }
    }

    fn apply_order(&mut self, update: &OrderUpdate) -> Vec<RenderOp> {
        let row_key = order_row_key(update.order_id);

        // The id is looked up across both sides; a resting order's side
        // and price never change, only its amount.
        if let Some(side) = self.sides.get(&update.order_id).copied() {
            if update.is_removal() {
                return self.remove_order(update.order_id, side);
            }
            return self.update_order(update.order_id, side, round_display(update.amount));
        }

        if update.is_removal() {
            // Fill or cancel for an order we never showed.
            debug!(order_id = update.order_id, "removal for unseen order");
            return Vec::new();
        }

        let entry = BookEntry {
            order_id: update.order_id,
            price: round_display(update.price),
            amount: round_display(update.amount),
        };
        let cells = vec![
            entry.order_id.to_string(),
            format_display(entry.price),
            format_display(entry.amount),
            format_display(entry.total()),
        ];

        let side = update.order_type;
        let book = self.side_mut(side);

        // First resting entry the new order must precede, by the side's
        // sort direction, fixes the insertion point.
        let insert_at = book.iter().position(|resting| match side {
            Side::Ask => resting.price > entry.price,
            Side::Bid => resting.price < entry.price,
        });

        let position = match insert_at {
            Some(index) => RowPosition::Before(order_row_key(book[index].order_id)),
            None => RowPosition::Append,
        };
        match insert_at {
            Some(index) => book.insert(index, entry),
            None => book.push(entry),
        }
        self.sides.insert(update.order_id, side);

        vec![
            RenderOp::InsertRow {
                region: region_for(side),
                key: row_key.clone(),
                cells,
                position,
            },
            RenderOp::Flash { key: row_key },
        ]
    }

    fn update_order(&mut self, order_id: u64, side: Side, amount: Decimal) -> Vec<RenderOp> {
        let book = self.side_mut(side);
        let Some(entry) = book.iter_mut().find(|e| e.order_id == order_id) else {
            return Vec::new();
        };
        entry.amount = amount;
        let total = entry.total();

        let amount_key = order_cell_key(order_id, "amount");
        let total_key = order_cell_key(order_id, "total");
        vec![
            RenderOp::UpdateCell {
                key: amount_key.clone(),
                text: format_display(amount),
            },
            RenderOp::Flash { key: amount_key },
            RenderOp::UpdateCell {
                key: total_key.clone(),
                text: format_display(total),
            },
            RenderOp::Flash { key: total_key },
        ]
    }

    fn remove_order(&mut self, order_id: u64, side: Side) -> Vec<RenderOp> {
        let book = self.side_mut(side);
        book.retain(|e| e.order_id != order_id);
        self.sides.remove(&order_id);

        let row_key = order_row_key(order_id);
        vec![
            RenderOp::Flash { key: row_key.clone() },
            RenderOp::RemoveRow {
                region: region_for(side),
                key: row_key,
            },
        ]
    }

    fn apply_trade(&mut self, update: TradeUpdate) -> Vec<RenderOp> {
        // Idempotent insert: a redelivered trade must not duplicate its row.
        if !self.seen_trades.insert(update.trade_id) {
            debug!(trade_id = update.trade_id, "duplicate trade dropped");
            return Vec::new();
        }

        let record = TradeRecord {
            trade_id: update.trade_id,
            trade_time: update.trade_time,
            trade_type: update.trade_type,
            price: round_display(update.price),
            amount: round_display(update.amount),
            initiating_id: update.initiating_id,
            existing_id: update.existing_id,
        };
        let row_key = trade_row_key(record.trade_id);
        let cells = vec![
            record.trade_time.clone(),
            record.trade_type.clone(),
            format_display(record.price),
            format_display(record.amount),
            format_display(record.total()),
            record.initiating_id.to_string(),
            record.existing_id.to_string(),
        ];
        self.trades.push_front(record);

        let mut ops = vec![
            RenderOp::InsertRow {
                region: Region::Trades,
                key: row_key.clone(),
                cells,
                position: RowPosition::Top,
            },
            RenderOp::Flash { key: row_key },
        ];

        while self.trades.len() > self.trade_capacity {
            if let Some(evicted) = self.trades.pop_back() {
                ops.push(RenderOp::RemoveRow {
                    region: Region::Trades,
                    key: trade_row_key(evicted.trade_id),
                });
            }
        }

        ops
    }

    fn apply_balance(&mut self, update: &BalanceUpdate) -> Vec<RenderOp> {
        self.balances
            .insert(update.currency.clone(), update.balance);

        let cell_key = balance_cell_key(&update.currency);
        vec![
            RenderOp::UpdateCell {
                key: cell_key.clone(),
                text: format_display(update.balance),
            },
            RenderOp::Flash { key: cell_key },
        ]
    }

    fn side_mut(&mut self, side: Side) -> &mut Vec<BookEntry> {
        match side {
            Side::Bid => &mut self.bids,
            Side::Ask => &mut self.asks,
        }
    }

    /// Resting bids, best (highest price) first.
    pub fn bids(&self) -> &[BookEntry] {
        &self.bids
    }

    /// Resting asks, best (lowest price) first.
    pub fn asks(&self) -> &[BookEntry] {
        &self.asks
    }

    /// Trade history, most recent first.
    pub fn trades(&self) -> impl Iterator<Item = &TradeRecord> {
        self.trades.iter()
    }

    /// Last observed balance for a currency.
    pub fn balance(&self, currency: &str) -> Option<Decimal> {
        self.balances.get(currency).copied()
    }

    /// Whether an order id currently rests on either side.
    pub fn contains_order(&self, order_id: u64) -> bool {
        self.sides.contains_key(&order_id)
    }
}

fn region_for(side: Side) -> Region {
    match side {
        Side::Bid => Region::BidOrders,
        Side::Ask => Region::AskOrders,
    }
}
