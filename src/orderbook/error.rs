//! Order book error types

use super::order::OrderId;
use std::fmt;

/// Errors that can occur within the OrderBook.
///
/// All variants are logic violations: admission rejections and unknown-id
/// cancels are ordinary outcomes and are reported through empty trade lists
/// instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBookError {
    /// A fill was requested for more than the order's remaining quantity
    FillExceedsRemaining {
        /// The order being filled
        order_id: OrderId,
    },

    /// A reprice was requested for an order that is not a market order
    NotAMarketOrder {
        /// The order being repriced
        order_id: OrderId,
    },

    /// A market order was repriced with the sentinel price
    UntradeablePrice {
        /// The order being repriced
        order_id: OrderId,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::FillExceedsRemaining { order_id } => {
                write!(
                    f,
                    "Order ({}) cannot be filled for more than its remaining quantity",
                    order_id
                )
            }
            OrderBookError::NotAMarketOrder { order_id } => {
                write!(
                    f,
                    "Order ({}) is not a market order and cannot be repriced",
                    order_id
                )
            }
            OrderBookError::UntradeablePrice { order_id } => {
                write!(f, "Order ({}) must be given a tradeable price", order_id)
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
