//! Aggregated per-level views of the book for market data.

use super::order::{Price, Quantity};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Quantity resting at a single price level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// The level's price
    pub price: Price,
    /// Sum of the remaining quantities resting there
    pub quantity: Quantity,
}

/// An immutable snapshot of both sides' level aggregates at a point in time.
///
/// Bids are ordered best-first (descending price), asks best-first (ascending
/// price), consistent with the indices at the moment of the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookLevelInfos {
    bids: Vec<LevelInfo>,
    asks: Vec<LevelInfo>,
}

impl OrderBookLevelInfos {
    pub(super) fn new(bids: Vec<LevelInfo>, asks: Vec<LevelInfo>) -> Self {
        Self { bids, asks }
    }

    /// Bid levels, best (highest price) first
    pub fn bids(&self) -> &[LevelInfo] {
        &self.bids
    }

    /// Ask levels, best (lowest price) first
    pub fn asks(&self) -> &[LevelInfo] {
        &self.asks
    }

    /// Get the best bid price and quantity
    pub fn best_bid(&self) -> Option<(Price, Quantity)> {
        let bid = self.bids.first().map(|level| (level.price, level.quantity));
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Get the best ask price and quantity
    pub fn best_ask(&self) -> Option<(Price, Quantity)> {
        let ask = self.asks.first().map(|level| (level.price, level.quantity));
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Calculate the total volume on the bid side
    pub fn total_bid_volume(&self) -> Quantity {
        let volume = self.bids.iter().map(|level| level.quantity).sum();
        trace!("total_bid_volume: {:?}", volume);
        volume
    }

    /// Calculate the total volume on the ask side
    pub fn total_ask_volume(&self) -> Quantity {
        let volume = self.asks.iter().map(|level| level.quantity).sum();
        trace!("total_ask_volume: {:?}", volume);
        volume
    }
}
