//! Background pruning of good-for-day orders at session close.

use super::book::Shared;
use super::order::{OrderId, OrderType};
use crate::utils::time::duration_until_session_close;
use std::sync::atomic::Ordering;
use tracing::trace;

/// Thread body spawned at book construction.
///
/// Sleeps until the next session close (plus scheduling slack) on a condition
/// variable tied to the book mutex, then sweeps good-for-day orders through
/// the normal cancel path. A shutdown store with release ordering followed by
/// a notify terminates the loop; a wake that is neither timeout nor shutdown
/// recomputes the deadline and waits again.
pub(super) fn prune_good_for_day_orders(shared: &Shared) {
    loop {
        let till = duration_until_session_close(shared.session_close);

        {
            let mut state = shared.state.lock();

            if shared.shutdown.load(Ordering::Acquire) {
                return;
            }

            let timed_out = shared.close_signal.wait_for(&mut state, till).timed_out();

            if shared.shutdown.load(Ordering::Acquire) {
                return;
            }

            if !timed_out {
                continue;
            }
        }

        prune_pass(shared);
    }
}

/// One sweep: cancel every good-for-day order currently resting.
pub(super) fn prune_pass(shared: &Shared) {
    let order_ids: Vec<OrderId> = {
        let state = shared.state.lock();
        state
            .orders
            .values()
            .filter(|order| order.order_type() == OrderType::GoodForDay)
            .map(|order| order.id())
            .collect()
    };

    if order_ids.is_empty() {
        return;
    }

    trace!(
        "Order book {}: Pruning {} good-for-day orders at session close",
        shared.symbol,
        order_ids.len()
    );

    shared.cancel_orders(&order_ids);
}
