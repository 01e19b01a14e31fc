//! Admission and lifecycle coverage through the public operations.

use matchbook::{Order, OrderBook, OrderModify, OrderType, Side, INVALID_PRICE};

fn setup_book() -> OrderBook {
    OrderBook::new("COVERAGE")
}

fn add_gtc(book: &OrderBook, id: u64, side: Side, price: i64, quantity: u64) {
    book.add_limit_order(id, side, price, quantity, OrderType::GoodTillCancel)
        .unwrap();
}

#[test]
fn test_market_order_value_type_carries_sentinel() {
    let order = Order::new_market(1, Side::Buy, 5);
    assert_eq!(order.price(), INVALID_PRICE);

    // The sentinel never reaches a ladder: admission on an empty book
    // rejects, and on a non-empty book reprices.
    let book = setup_book();
    assert!(book.add_order(order).unwrap().is_empty());
    assert_eq!(book.best_bid(), None);
}

#[test]
fn test_duplicate_rejection_spans_types() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Buy, 100, 10);

    for order in [
        Order::new(OrderType::FillAndKill, 1, Side::Sell, 100, 5),
        Order::new(OrderType::FillOrKill, 1, Side::Sell, 100, 5),
        Order::new_market(1, Side::Sell, 5),
    ] {
        let trades = book.add_order(order).unwrap();
        assert!(trades.is_empty());
    }

    assert_eq!(book.size(), 1);
    assert_eq!(book.get_order(1).unwrap().remaining_quantity(), 10);
}

#[test]
fn test_good_for_day_rests_like_gtc() {
    let book = setup_book();

    book.add_limit_order(1, Side::Buy, 100, 10, OrderType::GoodForDay)
        .unwrap();
    let trades = book
        .add_limit_order(2, Side::Sell, 100, 4, OrderType::GoodTillCancel)
        .unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(book.get_order(1).unwrap().remaining_quantity(), 6);
}

#[test]
fn test_fill_or_kill_ignores_levels_beyond_its_limit() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Sell, 101, 4);
    add_gtc(&book, 2, Side::Sell, 103, 10);

    // Supply beyond the limit cannot complete the order.
    let trades = book
        .add_limit_order(10, Side::Buy, 102, 5, OrderType::FillOrKill)
        .unwrap();
    assert!(trades.is_empty());
    assert_eq!(book.size(), 2);
}

#[test]
fn test_fill_and_kill_exact_fill_has_no_residual_to_clear() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Buy, 100, 5);

    let trades = book
        .add_limit_order(2, Side::Sell, 100, 5, OrderType::FillAndKill)
        .unwrap();

    assert_eq!(trades.len(), 1);
    assert_eq!(book.size(), 0);
}

#[test]
fn test_cancel_many_with_unknown_ids_in_batch() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Buy, 100, 10);
    add_gtc(&book, 2, Side::Sell, 105, 10);

    book.cancel_orders(&[7, 1, 8, 2, 9]);

    assert_eq!(book.size(), 0);
    assert!(book.level_infos().bids().is_empty());
    assert!(book.level_infos().asks().is_empty());
}

#[test]
fn test_modify_changing_side_moves_ladders() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Buy, 100, 10);
    book.modify_order(OrderModify::new(1, Side::Sell, 105, 10))
        .unwrap();

    assert_eq!(book.best_bid(), None);
    assert_eq!(book.best_ask(), Some(105));
    assert_eq!(book.get_order(1).unwrap().side(), Side::Sell);
}

#[test]
fn test_sizes_across_a_mixed_session() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Buy, 100, 10); // rests
    add_gtc(&book, 2, Side::Sell, 101, 10); // rests
    add_gtc(&book, 3, Side::Sell, 100, 15); // fills bid 1, rests with 5
    assert_eq!(book.size(), 2);

    book.cancel_order(2);
    assert_eq!(book.size(), 1);

    book.modify_order(OrderModify::new(3, Side::Sell, 99, 5))
        .unwrap();
    assert_eq!(book.size(), 1);

    book.cancel_order(3);
    assert_eq!(book.size(), 0);
    assert!(book.is_empty());
}

#[test]
fn test_rejection_paths_leave_every_index_unchanged() {
    let book = setup_book();

    add_gtc(&book, 1, Side::Sell, 101, 4);
    let levels = book.level_infos();
    let size = book.size();

    // FOK short of supply.
    book.add_limit_order(10, Side::Buy, 101, 5, OrderType::FillOrKill)
        .unwrap();
    // FAK with nothing to cross.
    book.add_limit_order(11, Side::Buy, 100, 5, OrderType::FillAndKill)
        .unwrap();
    // Market sell into empty bids.
    book.submit_market_order(12, Side::Sell, 5).unwrap();
    // Unknown-id cancel and modify.
    book.cancel_order(99);
    book.modify_order(OrderModify::new(99, Side::Buy, 100, 1))
        .unwrap();

    assert_eq!(book.size(), size);
    assert_eq!(book.level_infos(), levels);
}
