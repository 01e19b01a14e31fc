//! Trade records emitted by the matcher.

use super::order::{OrderId, Price, Quantity};
use serde::{Deserialize, Serialize};

/// One leg of a trade: the resting order it executed against, at that order's
/// own level price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeInfo {
    /// The order this leg belongs to
    pub order_id: OrderId,
    /// The price of the order's level at match time
    pub price: Price,
    /// Executed quantity, identical on both legs
    pub quantity: Quantity,
}

/// A single match between the head bid and the head ask of the crossing levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// The buy-side leg
    pub bid: TradeInfo,
    /// The sell-side leg
    pub ask: TradeInfo,
}

impl Trade {
    /// Executed quantity of this trade. Both legs always agree.
    pub fn quantity(&self) -> Quantity {
        self.bid.quantity
    }
}

/// Trades produced by a single admission, in emission order.
pub type Trades = Vec<Trade>;
