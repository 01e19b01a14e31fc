//! Minimal driver: add a resting order, cross it, inspect the book.

use matchbook::{Order, OrderBook, OrderType, Side};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let orderbook = OrderBook::new("DEMO");

    let order_id = 1;
    orderbook.add_order(Order::new(
        OrderType::GoodTillCancel,
        order_id,
        Side::Buy,
        100,
        10,
    ))?;
    println!("Size after inserting one order: {}", orderbook.size());

    let trades = orderbook.add_order(Order::new(OrderType::GoodTillCancel, 2, Side::Sell, 100, 7))?;
    for trade in &trades {
        println!(
            "Trade: buyer {} and seller {} exchanged {} @ {}",
            trade.bid.order_id,
            trade.ask.order_id,
            trade.quantity(),
            trade.ask.price
        );
    }

    orderbook.cancel_order(order_id);
    println!("Size after removing the order: {}", orderbook.size());

    Ok(())
}
