//! Contains the core matching engine logic and the fillability predicates.

use super::book::BookState;
use super::error::OrderBookError;
use super::order::{OrderId, OrderType, Price, Quantity, Side};
use super::trade::{Trade, TradeInfo, Trades};

impl BookState {
    /// Whether an order at `price` would cross at least one opposite level.
    pub(super) fn can_match(&self, side: Side, price: Price) -> bool {
        match side {
            Side::Buy => self
                .asks
                .first_key_value()
                .is_some_and(|(best_ask, _)| price >= *best_ask),
            Side::Sell => self
                .bids
                .last_key_value()
                .is_some_and(|(best_bid, _)| price <= *best_bid),
        }
    }

    /// Whether the opposite side holds at least `quantity` units at prices
    /// crossing `price`. Walks the per-level aggregates best-first, so the
    /// check is O(levels) rather than O(orders), and agrees with what the
    /// matcher would execute.
    pub(super) fn can_fully_fill(&self, side: Side, price: Price, quantity: Quantity) -> bool {
        if !self.can_match(side, price) {
            return false;
        }

        let mut needed = quantity;
        let opposite = side.opposite();

        let mut covered = |data: &super::book::LevelData| {
            if needed <= data.quantity {
                return true;
            }
            needed -= data.quantity;
            false
        };

        match side {
            // Crossable asks are the levels at or below the buy limit,
            // cheapest first.
            Side::Buy => {
                for (_, data) in self
                    .level_data
                    .range((opposite, Price::MIN)..=(opposite, price))
                {
                    if covered(data) {
                        return true;
                    }
                }
            }
            // Crossable bids are the levels at or above the sell limit,
            // dearest first.
            Side::Sell => {
                for (_, data) in self
                    .level_data
                    .range((opposite, price)..=(opposite, Price::MAX))
                    .rev()
                {
                    if covered(data) {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Cross-and-fill loop. Invoked at the end of every admission, under the
    /// book mutex.
    ///
    /// Repeatedly matches the heads of the best bid and best ask levels while
    /// the book is crossed, emitting one trade per head-to-head fill. Each leg
    /// quotes its own resting price; the match price is necessarily within the
    /// cross. After matching, any fill-and-kill or fill-or-kill order left at
    /// the head of either side is cancelled: those disciplines may not rest
    /// residuals.
    pub(super) fn match_orders(&mut self) -> Result<Trades, OrderBookError> {
        let mut trades = Trades::with_capacity(self.orders.len());

        loop {
            let Some(bid_price) = self.bids.last_key_value().map(|(price, _)| *price) else {
                break;
            };
            let Some(ask_price) = self.asks.first_key_value().map(|(price, _)| *price) else {
                break;
            };

            if bid_price < ask_price {
                break;
            }

            // Fill the level heads against each other until one level empties,
            // then re-read the best prices.
            while let (Some(bid_id), Some(ask_id)) = (
                self.bids.get(&bid_price).and_then(|queue| queue.front().copied()),
                self.asks.get(&ask_price).and_then(|queue| queue.front().copied()),
            ) {
                let quantity = match (self.orders.get(&bid_id), self.orders.get(&ask_id)) {
                    (Some(bid), Some(ask)) => {
                        bid.remaining_quantity().min(ask.remaining_quantity())
                    }
                    _ => break,
                };

                let bid_leg = self.fill_resting(bid_id, bid_price, Side::Buy, quantity)?;
                let ask_leg = self.fill_resting(ask_id, ask_price, Side::Sell, quantity)?;

                self.last_trade_price = Some(ask_leg.price);
                trades.push(Trade {
                    bid: bid_leg,
                    ask: ask_leg,
                });
            }
        }

        self.clear_top_residual(Side::Buy);
        self.clear_top_residual(Side::Sell);

        Ok(trades)
    }

    /// Execute one leg of a trade against a resting order: reduce it, pop it
    /// from its FIFO when filled, erase its level when empty, and fold the
    /// fill into the level aggregate.
    fn fill_resting(
        &mut self,
        order_id: OrderId,
        price: Price,
        side: Side,
        quantity: Quantity,
    ) -> Result<TradeInfo, OrderBookError> {
        let filled = match self.orders.get_mut(&order_id) {
            Some(order) => {
                order.fill(quantity)?;
                order.is_filled()
            }
            None => false,
        };

        if filled {
            self.orders.remove(&order_id);

            let ladder = self.ladder_mut(side);
            if let Some(queue) = ladder.get_mut(&price) {
                queue.pop_front();
                if queue.is_empty() {
                    ladder.remove(&price);
                }
            }
        }

        self.on_order_matched(side, price, quantity, filled);

        Ok(TradeInfo {
            order_id,
            price,
            quantity,
        })
    }

    /// Cancel the head of a side's best level when its discipline forbids
    /// resting residuals.
    fn clear_top_residual(&mut self, side: Side) {
        let head = match side {
            Side::Buy => self.bids.last_key_value(),
            Side::Sell => self.asks.first_key_value(),
        }
        .and_then(|(_, queue)| queue.front().copied());

        let Some(order_id) = head else {
            return;
        };

        let immediate = self.orders.get(&order_id).is_some_and(|order| {
            matches!(
                order.order_type(),
                OrderType::FillAndKill | OrderType::FillOrKill
            )
        });

        if immediate {
            self.cancel_order_internal(order_id);
        }
    }
}
