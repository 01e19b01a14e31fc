use super::book::{BookState, LevelData, LevelDataAction};
use super::order::{Order, OrderId, Price, Quantity, Side};
use std::collections::{BTreeMap, VecDeque};

impl BookState {
    /// The ladder a side's orders rest in.
    pub(super) fn ladder_mut(&mut self, side: Side) -> &mut BTreeMap<Price, VecDeque<OrderId>> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// Remove an order from all three indices. Unknown ids are a no-op.
    pub(super) fn cancel_order_internal(&mut self, order_id: OrderId) {
        let Some(order) = self.orders.remove(&order_id) else {
            return;
        };

        let price = order.price();
        let ladder = self.ladder_mut(order.side());

        if let Some(queue) = ladder.get_mut(&price) {
            if let Some(position) = queue.iter().position(|id| *id == order_id) {
                queue.remove(position);
            }
            if queue.is_empty() {
                ladder.remove(&price);
            }
        }

        self.on_order_cancelled(&order);
    }

    pub(super) fn on_order_added(&mut self, order: &Order) {
        self.update_level_data(
            order.side(),
            order.price(),
            order.initial_quantity(),
            LevelDataAction::Add,
        );
    }

    pub(super) fn on_order_cancelled(&mut self, order: &Order) {
        self.update_level_data(
            order.side(),
            order.price(),
            order.remaining_quantity(),
            LevelDataAction::Remove,
        );
    }

    pub(super) fn on_order_matched(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
        fully_filled: bool,
    ) {
        let action = if fully_filled {
            LevelDataAction::Remove
        } else {
            LevelDataAction::Match
        };
        self.update_level_data(side, price, quantity, action);
    }

    /// Apply one action to a level aggregate; empty aggregates are erased.
    pub(super) fn update_level_data(
        &mut self,
        side: Side,
        price: Price,
        quantity: Quantity,
        action: LevelDataAction,
    ) {
        let data = self
            .level_data
            .entry((side, price))
            .or_insert_with(LevelData::default);

        match action {
            LevelDataAction::Add => {
                data.count += 1;
                data.quantity += quantity;
            }
            LevelDataAction::Match => {
                data.quantity = data.quantity.saturating_sub(quantity);
            }
            LevelDataAction::Remove => {
                data.count = data.count.saturating_sub(1);
                data.quantity = data.quantity.saturating_sub(quantity);
            }
        }

        if data.count == 0 {
            self.level_data.remove(&(side, price));
        }
    }
}
