//! Core OrderBook state: three coupled indices behind a single mutex.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use chrono::NaiveTime;
use parking_lot::{Condvar, Mutex};
use tracing::trace;

use super::order::{Order, OrderId, Price, Quantity, Side};
use super::pruner;
use super::snapshot::{LevelInfo, OrderBookLevelInfos};
use crate::utils::time::default_session_close;

/// Aggregate over the orders resting on one side of one price level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(super) struct LevelData {
    /// Number of resting orders
    pub(super) count: u64,
    /// Sum of their remaining quantities
    pub(super) quantity: Quantity,
}

/// How a mutation affects a level aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum LevelDataAction {
    /// An order joined the level
    Add,
    /// An order departed the level (filled, cancelled or residual cleared)
    Remove,
    /// An order took a partial fill at the level
    Match,
}

/// The three indices. Every mutation keeps them mutually consistent: a live
/// order appears exactly once in `orders`, exactly once in its side's ladder
/// at its current price, and is counted in exactly one `level_data` entry.
pub(super) struct BookState {
    /// Authoritative per-order store
    pub(super) orders: HashMap<OrderId, Order>,

    /// Buy ladder. Best bid is the largest key; orders at a price form a FIFO
    /// of admission order.
    pub(super) bids: BTreeMap<Price, VecDeque<OrderId>>,

    /// Sell ladder. Best ask is the smallest key.
    pub(super) asks: BTreeMap<Price, VecDeque<OrderId>>,

    /// Per-(side, price) aggregate backing the fillability oracle and
    /// market-data views
    pub(super) level_data: BTreeMap<(Side, Price), LevelData>,

    /// Sell-side leg price of the most recent trade
    pub(super) last_trade_price: Option<Price>,
}

impl BookState {
    fn new() -> Self {
        Self {
            orders: HashMap::new(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            level_data: BTreeMap::new(),
            last_trade_price: None,
        }
    }
}

/// State shared between the caller-facing handle and the pruner thread.
pub(super) struct Shared {
    /// The symbol or identifier for this order book
    pub(super) symbol: String,

    /// All indices, serialized by this mutex
    pub(super) state: Mutex<BookState>,

    /// Set once, with release ordering, when the book is dropped
    pub(super) shutdown: AtomicBool,

    /// Wakes the pruner out of its timed wait on shutdown
    pub(super) close_signal: Condvar,

    /// Local civil time at which good-for-day orders are pruned
    pub(super) session_close: NaiveTime,
}

/// The OrderBook maintains two price ladders of resting orders and matches
/// crossing orders under price-time priority.
///
/// All operations are serialized by a single mutex, so the observable sequence
/// of adds, trades and cancels is a strict total order over the callers'
/// requests. A background thread cancels good-for-day orders at session close
/// and is joined when the book is dropped.
pub struct OrderBook {
    pub(super) shared: Arc<Shared>,
    prune_thread: Option<JoinHandle<()>>,
}

impl OrderBook {
    /// Create a new order book for the given symbol. Good-for-day orders are
    /// pruned at 16:00 local time.
    pub fn new(symbol: &str) -> Self {
        Self::with_session_close(symbol, default_session_close())
    }

    /// Create a new order book with an explicit session close time.
    pub fn with_session_close(symbol: &str, session_close: NaiveTime) -> Self {
        let shared = Arc::new(Shared {
            symbol: symbol.to_string(),
            state: Mutex::new(BookState::new()),
            shutdown: AtomicBool::new(false),
            close_signal: Condvar::new(),
            session_close,
        });

        let prune_shared = Arc::clone(&shared);
        let prune_thread = thread::spawn(move || {
            pruner::prune_good_for_day_orders(&prune_shared);
        });

        Self {
            shared,
            prune_thread: Some(prune_thread),
        }
    }

    /// Get the symbol of this order book
    pub fn symbol(&self) -> &str {
        &self.shared.symbol
    }

    /// Number of live orders in the book
    pub fn size(&self) -> usize {
        self.shared.state.lock().orders.len()
    }

    /// Whether no orders are resting
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Get a copy of a resting order by ID
    pub fn get_order(&self, order_id: OrderId) -> Option<Order> {
        self.shared.state.lock().orders.get(&order_id).cloned()
    }

    /// Get the best bid price, if any
    pub fn best_bid(&self) -> Option<Price> {
        self.shared
            .state
            .lock()
            .bids
            .last_key_value()
            .map(|(price, _)| *price)
    }

    /// Get the best ask price, if any
    pub fn best_ask(&self) -> Option<Price> {
        self.shared
            .state
            .lock()
            .asks
            .first_key_value()
            .map(|(price, _)| *price)
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<Price> {
        let state = self.shared.state.lock();
        match (
            state.bids.last_key_value().map(|(price, _)| *price),
            state.asks.first_key_value().map(|(price, _)| *price),
        ) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        let state = self.shared.state.lock();
        match (
            state.bids.last_key_value().map(|(price, _)| *price),
            state.asks.first_key_value().map(|(price, _)| *price),
        ) {
            (Some(bid), Some(ask)) => Some((bid as f64 + ask as f64) / 2.0),
            _ => None,
        }
    }

    /// Price of the sell-side leg of the last trade, if any trade occurred
    pub fn last_trade_price(&self) -> Option<Price> {
        self.shared.state.lock().last_trade_price
    }

    /// Create a per-level snapshot of both sides: `(price, Σ remaining)` for
    /// each level, bids descending and asks ascending by price.
    pub fn level_infos(&self) -> OrderBookLevelInfos {
        trace!("Order book {}: Creating level snapshot", self.shared.symbol);
        let state = self.shared.state.lock();

        fn level(state: &BookState, price: Price, queue: &VecDeque<OrderId>) -> LevelInfo {
            LevelInfo {
                price,
                quantity: queue
                    .iter()
                    .filter_map(|id| state.orders.get(id))
                    .map(Order::remaining_quantity)
                    .sum(),
            }
        }

        let bids = state
            .bids
            .iter()
            .rev()
            .map(|(price, queue)| level(&state, *price, queue))
            .collect();
        let asks = state
            .asks
            .iter()
            .map(|(price, queue)| level(&state, *price, queue))
            .collect();

        OrderBookLevelInfos::new(bids, asks)
    }
}

impl Drop for OrderBook {
    fn drop(&mut self) {
        // The flag is stored and the condvar notified under the book mutex:
        // the pruner checks the flag under the same mutex before waiting, so
        // the wakeup cannot fall between its check and its wait.
        {
            let _state = self.shared.state.lock();
            self.shared
                .shutdown
                .store(true, std::sync::atomic::Ordering::Release);
            self.shared.close_signal.notify_all();
        }

        if let Some(handle) = self.prune_thread.take() {
            let _ = handle.join();
        }
    }
}
