//! # Price-Time-Priority Limit Order Book
//!
//! A continuous-time limit order book and matching engine for a single tradable
//! instrument, written in Rust. The engine accepts buy and sell orders of several
//! discipline types, maintains two opposing side-books aggregated by price level,
//! matches crossing orders deterministically and returns the trades each admission
//! produces.
//!
//! ## Key Features
//!
//! - **Multiple Order Types**: Market, good-till-cancel, good-for-day,
//!   fill-and-kill and fill-or-kill orders, each with its own admission rule.
//!
//! - **Price-Time Priority**: Orders match best price first; at equal prices the
//!   earliest admitted order matches first. Replacing an order re-admits it at the
//!   tail of its new level.
//!
//! - **Aggregated Level Data**: A per-level aggregate of resting quantity keeps
//!   fill-or-kill admission checks at O(levels) instead of O(orders), and backs
//!   cheap per-level market-data snapshots.
//!
//! - **Session-Close Pruning**: A background thread cancels good-for-day orders
//!   at the configured session close (16:00 local by default) and shuts down
//!   cleanly when the book is dropped.
//!
//! - **Thread Safety**: All indices live behind a single mutex, so every
//!   observed sequence of adds, trades and cancels is a strict serialization of
//!   the callers' requests.
//!
//! ## Design Goals
//!
//! 1. **Correctness**: The per-order index, the two price ladders and the
//!    per-level aggregates stay mutually consistent after every operation.
//! 2. **Determinism**: Matching, tie-breaking and admission are fully
//!    deterministic given the sequence of requests.
//! 3. **Clean Shutdown**: The pruner thread terminates promptly on drop without
//!    leaking or cancelling in-flight work.
//!
//! ## Status
//!
//! This crate is a reference-quality engine for simulation, research and
//! education; it has no network front end or persistence.

mod orderbook;

mod utils;

pub use orderbook::{
    LevelInfo, Order, OrderBook, OrderBookError, OrderBookLevelInfos, OrderId, OrderModify,
    OrderType, Price, Quantity, Side, Trade, TradeInfo, Trades, INVALID_PRICE,
};
pub use utils::current_time_millis;
