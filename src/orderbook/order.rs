//! Order value types and the mutable state of a single order.

use super::error::OrderBookError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Price of a level, in ticks.
pub type Price = i64;

/// Number of units of the instrument.
pub type Quantity = u64;

/// Opaque order identifier assigned by the caller.
pub type OrderId = u64;

/// Sentinel carried by a market order until it is repriced on admission.
/// Never present in a ladder.
pub const INVALID_PRICE: Price = Price::MIN;

/// Which side of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy orders rest in the bid ladder.
    Buy,
    /// Sell orders rest in the ask ladder.
    Sell,
}

impl Side {
    /// The side this side's orders match against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Discipline governing how an order is admitted and how long it rests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Priced at the worst opposite level on admission, then matched.
    /// Rejected when the opposite side is empty.
    Market,
    /// Rests until filled or cancelled.
    GoodTillCancel,
    /// Rests like `GoodTillCancel` but is cancelled at session close.
    GoodForDay,
    /// Admitted only if it can match at least partially; any residual is
    /// cancelled after matching.
    FillAndKill,
    /// Admitted only if it can be filled completely at its limit; otherwise
    /// rejected without touching the book.
    FillOrKill,
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderType::Market => write!(f, "MARKET"),
            OrderType::GoodTillCancel => write!(f, "GTC"),
            OrderType::GoodForDay => write!(f, "GFD"),
            OrderType::FillAndKill => write!(f, "FAK"),
            OrderType::FillOrKill => write!(f, "FOK"),
        }
    }
}

/// A single order tracked by the book.
///
/// Created by the caller, mutated only by the engine under its mutex: fills
/// reduce the remaining quantity, and a market order is repriced exactly once
/// before admission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    order_type: OrderType,
    id: OrderId,
    side: Side,
    price: Price,
    initial_quantity: Quantity,
    remaining_quantity: Quantity,
}

impl Order {
    /// Create a new priced order.
    pub fn new(
        order_type: OrderType,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            order_type,
            id,
            side,
            price,
            initial_quantity: quantity,
            remaining_quantity: quantity,
        }
    }

    /// Create a market order. It carries [`INVALID_PRICE`] until admission.
    pub fn new_market(id: OrderId, side: Side, quantity: Quantity) -> Self {
        Self::new(OrderType::Market, id, side, INVALID_PRICE, quantity)
    }

    /// The order's discipline.
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// The caller-assigned identifier.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Buy or sell.
    pub fn side(&self) -> Side {
        self.side
    }

    /// The limit price, or [`INVALID_PRICE`] for an unadmitted market order.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Quantity at creation time.
    pub fn initial_quantity(&self) -> Quantity {
        self.initial_quantity
    }

    /// Quantity not yet executed.
    pub fn remaining_quantity(&self) -> Quantity {
        self.remaining_quantity
    }

    /// Cumulative executed quantity.
    pub fn filled_quantity(&self) -> Quantity {
        self.initial_quantity - self.remaining_quantity
    }

    /// Whether nothing is left to execute.
    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Execute `quantity` units against this order.
    pub(super) fn fill(&mut self, quantity: Quantity) -> Result<(), OrderBookError> {
        if quantity > self.remaining_quantity {
            return Err(OrderBookError::FillExceedsRemaining { order_id: self.id });
        }

        self.remaining_quantity -= quantity;
        Ok(())
    }

    /// Reprice a market order and convert it to good-till-cancel.
    pub(super) fn to_good_till_cancel(&mut self, price: Price) -> Result<(), OrderBookError> {
        if self.order_type != OrderType::Market {
            return Err(OrderBookError::NotAMarketOrder { order_id: self.id });
        }

        if price == INVALID_PRICE {
            return Err(OrderBookError::UntradeablePrice { order_id: self.id });
        }

        self.price = price;
        self.order_type = OrderType::GoodTillCancel;
        Ok(())
    }
}

/// Request to replace a resting order's price and quantity.
///
/// Carries no discipline: the engine reuses the existing order's type. The
/// replacement is admitted like a fresh order, so it loses its time priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderModify {
    id: OrderId,
    side: Side,
    price: Price,
    quantity: Quantity,
}

impl OrderModify {
    /// Create a replacement request for the order with `id`.
    pub fn new(id: OrderId, side: Side, price: Price, quantity: Quantity) -> Self {
        Self {
            id,
            side,
            price,
            quantity,
        }
    }

    /// Identifier of the order to replace.
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Side of the replacement.
    pub fn side(&self) -> Side {
        self.side
    }

    /// New limit price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// New quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Build the replacement order under the preserved discipline.
    pub fn to_order(&self, order_type: OrderType) -> Order {
        Order::new(order_type, self.id, self.side, self.price, self.quantity)
    }
}
