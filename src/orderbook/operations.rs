//! Order book operations: admission rules and the add path.

use super::book::OrderBook;
use super::error::OrderBookError;
use super::order::{Order, OrderId, OrderType, Price, Quantity, Side};
use super::trade::Trades;
use tracing::trace;

impl OrderBook {
    /// Add an order to the book, matching it immediately if it crosses.
    ///
    /// Returns the trades this admission produced, possibly empty. A duplicate
    /// id, a market order with an empty opposite side, a fill-and-kill order
    /// that cannot cross or a fill-or-kill order that cannot be fully filled
    /// is rejected: the call returns an empty trade list and the book is left
    /// untouched.
    pub fn add_order(&self, order: Order) -> Result<Trades, OrderBookError> {
        let mut state = self.shared.state.lock();

        trace!(
            "Order book {}: Adding order {} ({} {} {} x {})",
            self.shared.symbol,
            order.id(),
            order.order_type(),
            order.side(),
            order.price(),
            order.initial_quantity()
        );

        if state.orders.contains_key(&order.id()) {
            trace!(
                "Order book {}: Rejecting duplicate order id {}",
                self.shared.symbol,
                order.id()
            );
            return Ok(Trades::new());
        }

        let mut order = order;

        if order.order_type() == OrderType::Market {
            // Reprice at the worst opposite level so the order stays
            // admissible against every crossing level while it rests.
            let worst_opposite = match order.side() {
                Side::Buy => state.asks.last_key_value().map(|(price, _)| *price),
                Side::Sell => state.bids.first_key_value().map(|(price, _)| *price),
            };

            match worst_opposite {
                Some(price) => order.to_good_till_cancel(price)?,
                None => {
                    trace!(
                        "Order book {}: Rejecting market order {}, no opposite liquidity",
                        self.shared.symbol,
                        order.id()
                    );
                    return Ok(Trades::new());
                }
            }
        }

        if order.order_type() == OrderType::FillAndKill
            && !state.can_match(order.side(), order.price())
        {
            trace!(
                "Order book {}: Rejecting fill-and-kill order {}, nothing to cross",
                self.shared.symbol,
                order.id()
            );
            return Ok(Trades::new());
        }

        if order.order_type() == OrderType::FillOrKill
            && !state.can_fully_fill(order.side(), order.price(), order.initial_quantity())
        {
            trace!(
                "Order book {}: Rejecting fill-or-kill order {}, insufficient supply",
                self.shared.symbol,
                order.id()
            );
            return Ok(Trades::new());
        }

        let id = order.id();
        let side = order.side();
        let price = order.price();

        state.ladder_mut(side).entry(price).or_default().push_back(id);
        state.on_order_added(&order);
        state.orders.insert(id, order);

        state.match_orders()
    }

    /// Add a priced order without constructing it by hand
    pub fn add_limit_order(
        &self,
        id: OrderId,
        side: Side,
        price: Price,
        quantity: Quantity,
        order_type: OrderType,
    ) -> Result<Trades, OrderBookError> {
        self.add_order(Order::new(order_type, id, side, price, quantity))
    }

    /// Submit a market order for immediate execution at the best available
    /// prices
    pub fn submit_market_order(
        &self,
        id: OrderId,
        side: Side,
        quantity: Quantity,
    ) -> Result<Trades, OrderBookError> {
        self.add_order(Order::new_market(id, side, quantity))
    }
}
