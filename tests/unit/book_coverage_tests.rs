//! End-to-end scenarios for the order book as a whole.

use matchbook::{OrderBook, OrderModify, OrderType, Side};

fn setup_book() -> OrderBook {
    OrderBook::new("COVERAGE")
}

fn add_gtc(book: &OrderBook, id: u64, side: Side, price: i64, quantity: u64) {
    book.add_limit_order(id, side, price, quantity, OrderType::GoodTillCancel)
        .unwrap();
}

#[test]
fn test_simple_cross_scenario() {
    let book = setup_book();

    let trades = book
        .add_limit_order(1, Side::Buy, 100, 10, OrderType::GoodTillCancel)
        .unwrap();
    assert!(trades.is_empty());
    assert_eq!(book.size(), 1);

    let trades = book
        .add_limit_order(2, Side::Sell, 100, 7, OrderType::GoodTillCancel)
        .unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].bid.order_id, 1);
    assert_eq!(trades[0].bid.price, 100);
    assert_eq!(trades[0].ask.order_id, 2);
    assert_eq!(trades[0].ask.price, 100);
    assert_eq!(trades[0].quantity(), 7);
    assert_eq!(book.size(), 1);
    assert_eq!(book.get_order(1).unwrap().remaining_quantity(), 3);
}

#[test]
fn test_price_time_priority_scenario() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Buy, 100, 5);
    add_gtc(&book, 2, Side::Buy, 100, 5);
    let trades = book
        .add_limit_order(3, Side::Sell, 100, 5, OrderType::GoodTillCancel)
        .unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].bid.order_id, 1);
    assert_eq!(book.get_order(1), None);
    assert_eq!(book.get_order(2).unwrap().remaining_quantity(), 5);
}

#[test]
fn test_fill_or_kill_rejection_scenario() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Sell, 101, 4);
    add_gtc(&book, 2, Side::Sell, 102, 3);

    let before = book.level_infos();
    let trades = book
        .add_limit_order(10, Side::Buy, 101, 5, OrderType::FillOrKill)
        .unwrap();

    assert!(trades.is_empty());
    assert_eq!(book.level_infos(), before);
    assert_eq!(book.size(), 2);
}

#[test]
fn test_fill_and_kill_partial_scenario() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Sell, 100, 3);

    let trades = book
        .add_limit_order(20, Side::Buy, 100, 10, OrderType::FillAndKill)
        .unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].quantity(), 3);
    assert_eq!(book.size(), 0);
    assert!(book.level_infos().asks().is_empty());
}

#[test]
fn test_market_with_empty_opposite_scenario() {
    let book = setup_book();

    let trades = book.submit_market_order(30, Side::Buy, 5).unwrap();

    assert!(trades.is_empty());
    assert_eq!(book.size(), 0);
}

#[test]
fn test_modify_loses_priority_scenario() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Buy, 100, 5);
    add_gtc(&book, 2, Side::Buy, 100, 5);

    book.modify_order(OrderModify::new(1, Side::Buy, 100, 5))
        .unwrap();

    let trades = book
        .add_limit_order(3, Side::Sell, 100, 5, OrderType::GoodTillCancel)
        .unwrap();
    assert_eq!(trades.len(), 1);
    assert_eq!(trades[0].bid.order_id, 2);
}

#[test]
fn test_cancel_after_add_restores_size_and_levels() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Buy, 100, 10);
    let size_before = book.size();
    let levels_before = book.level_infos();

    add_gtc(&book, 2, Side::Sell, 105, 4);
    book.cancel_order(2);

    assert_eq!(book.size(), size_before);
    assert_eq!(book.level_infos(), levels_before);
}

#[test]
fn test_snapshot_sums_match_resting_orders() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Buy, 100, 10);
    add_gtc(&book, 2, Side::Buy, 100, 5);
    add_gtc(&book, 3, Side::Sell, 101, 8);
    // Partial fill at 101 via a crossing buy.
    add_gtc(&book, 4, Side::Buy, 101, 2);

    let infos = book.level_infos();

    let bid_total: u64 = infos.bids().iter().map(|l| l.quantity).sum();
    let ask_total: u64 = infos.asks().iter().map(|l| l.quantity).sum();

    assert_eq!(bid_total, 15);
    assert_eq!(ask_total, 6);

    // Bids strictly descending, asks strictly ascending.
    let bid_prices: Vec<i64> = infos.bids().iter().map(|l| l.price).collect();
    let mut sorted = bid_prices.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(bid_prices, sorted);

    let ask_prices: Vec<i64> = infos.asks().iter().map(|l| l.price).collect();
    let mut sorted = ask_prices.clone();
    sorted.sort();
    assert_eq!(ask_prices, sorted);
}

#[test]
fn test_concurrent_callers_keep_consistent_counts() {
    use std::sync::Arc;
    use std::thread;

    let book = Arc::new(setup_book());
    let mut handles = Vec::new();

    // Four writers on disjoint id ranges and non-crossing prices.
    for worker in 0..4u64 {
        let book = Arc::clone(&book);
        handles.push(thread::spawn(move || {
            let base = worker * 1000;
            let side = if worker % 2 == 0 { Side::Buy } else { Side::Sell };
            let price = if side == Side::Buy { 90 } else { 110 };
            for i in 0..100 {
                book.add_limit_order(base + i, side, price, 1, OrderType::GoodTillCancel)
                    .unwrap();
            }
            for i in 0..50 {
                book.cancel_order(base + i);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(book.size(), 4 * 50);
    let infos = book.level_infos();
    let total = infos.total_bid_volume() + infos.total_ask_volume();
    assert_eq!(total, 4 * 50);
}
