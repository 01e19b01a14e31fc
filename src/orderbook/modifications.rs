//! Cancellation and replacement of resting orders.

use super::book::{OrderBook, Shared};
use super::error::OrderBookError;
use super::order::{OrderId, OrderModify};
use super::trade::Trades;
use tracing::trace;

impl Shared {
    /// Cancel a batch of orders under one lock acquisition. Shared between the
    /// public cancel paths and the pruner.
    pub(super) fn cancel_orders(&self, order_ids: &[OrderId]) {
        let mut state = self.state.lock();

        for order_id in order_ids {
            state.cancel_order_internal(*order_id);
        }
    }
}

impl OrderBook {
    /// Cancel an order by ID. Unknown ids are a no-op.
    pub fn cancel_order(&self, order_id: OrderId) {
        trace!(
            "Order book {}: Cancelling order {}",
            self.shared.symbol,
            order_id
        );
        let mut state = self.shared.state.lock();
        state.cancel_order_internal(order_id);
    }

    /// Cancel several orders under a single lock acquisition.
    pub fn cancel_orders(&self, order_ids: &[OrderId]) {
        trace!(
            "Order book {}: Cancelling {} orders",
            self.shared.symbol,
            order_ids.len()
        );
        self.shared.cancel_orders(order_ids);
    }

    /// Replace a resting order's price and quantity, preserving its type.
    ///
    /// The replacement is admitted like a fresh order and therefore joins the
    /// tail of its new level: time priority is lost. The lock is released
    /// between the cancel and the re-add, so a concurrent caller may briefly
    /// observe the order absent. Unknown ids return an empty trade list and
    /// mutate nothing.
    pub fn modify_order(&self, modify: OrderModify) -> Result<Trades, OrderBookError> {
        let order_type = {
            let state = self.shared.state.lock();
            match state.orders.get(&modify.id()) {
                Some(order) => order.order_type(),
                None => return Ok(Trades::new()),
            }
        };

        trace!(
            "Order book {}: Replacing order {} ({} {} x {})",
            self.shared.symbol,
            modify.id(),
            modify.side(),
            modify.price(),
            modify.quantity()
        );

        self.cancel_order(modify.id());
        self.add_order(modify.to_order(order_type))
    }
}
