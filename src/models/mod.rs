//! Wire-format models for the exchange feed.
//!
//! Every frame is a single JSON object tagged by a `message_type`
//! discriminator. [`FeedMessage::parse`] performs the two-stage decode:
//! route on the discriminator, then deserialize the typed payload.

pub mod balance;
pub mod order;
pub mod trade;

pub use balance::BalanceUpdate;
pub use order::{OrderState, OrderUpdate, Side};
pub use trade::TradeUpdate;

use crate::DepthviewError;

/// A decoded feed frame.
#[derive(Debug, Clone)]
pub enum FeedMessage {
    /// An order was placed, changed, or left the book.
    Order(OrderUpdate),
    /// A match between two orders completed.
    Trade(TradeUpdate),
    /// A currency balance changed.
    Balance(BalanceUpdate),
    /// The discriminator was present but not one we know.
    Unknown {
        message_type: String,
    },
}

impl FeedMessage {
    /// Parses a raw text frame into a typed feed message.
    ///
    /// A recognized `message_type` with a bad payload is an error; an
    /// unrecognized one yields [`FeedMessage::Unknown`] so callers can
    /// warn and move on (forward compatibility).
    ///
    /// # Errors
    ///
    /// Returns [`DepthviewError::MalformedMessage`] if the frame is not
    /// valid JSON, the discriminator is missing, or a required field of
    /// a known message type is absent or mistyped.
    pub fn parse(text: &str) -> crate::Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| DepthviewError::MalformedMessage(e.to_string()))?;

        let message_type = value
            .get("message_type")
            .and_then(|t| t.as_str())
            .map(String::from)
            .ok_or_else(|| {
                DepthviewError::MalformedMessage("missing message_type discriminator".to_string())
            })?;

        match message_type.as_str() {
            "order" => {
                let update: OrderUpdate = serde_json::from_value(value).map_err(|e| {
                    DepthviewError::MalformedMessage(format!("bad order message: {e}"))
                })?;
                Ok(FeedMessage::Order(update))
            }
            "trade" => {
                let update: TradeUpdate = serde_json::from_value(value).map_err(|e| {
                    DepthviewError::MalformedMessage(format!("bad trade message: {e}"))
                })?;
                Ok(FeedMessage::Trade(update))
            }
            "balance" => {
                let update: BalanceUpdate = serde_json::from_value(value).map_err(|e| {
                    DepthviewError::MalformedMessage(format!("bad balance message: {e}"))
                })?;
                Ok(FeedMessage::Balance(update))
            }
            _ => Ok(FeedMessage::Unknown { message_type }),
        }
    }
}
