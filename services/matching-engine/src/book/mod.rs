//! Order book for a single market
//!
//! Two price-indexed ladders (bids descending, asks ascending) of FIFO
//! price levels, plus an order-id index so cancellation touches only the
//! level that holds the order.
//!
//! Matching walks the opposing ladder best-price-first and each level
//! oldest-order-first. The execution price is always the maker's resting
//! price; the taker keeps any price improvement.

pub mod ask_book;
pub mod bid_book;
pub mod price_level;
pub mod resting_order;

pub use ask_book::AskBook;
pub use bid_book::BidBook;
pub use price_level::PriceLevel;
pub use resting_order::RestingOrder;

use std::collections::HashMap;
use types::ids::OrderId;
use types::market::Market;
use types::numeric::{Price, Quantity};
use types::order::Side;

use crate::events::{CancelResult, Execution};

/// Price-time-priority order book for one market
#[derive(Debug, Clone)]
pub struct OrderBook {
    market: Market,
    bids: BidBook,
    asks: AskBook,
    /// Locates a resting order for O(1) level lookup on cancel.
    /// Every resting order has exactly one entry here and vice versa.
    index: HashMap<OrderId, (Side, Price)>,
}

impl OrderBook {
    pub fn new(market: Market) -> Self {
        Self {
            market,
            bids: BidBook::new(),
            asks: AskBook::new(),
            index: HashMap::new(),
        }
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    /// Match a taker buy against the asks while the best ask does not
    /// exceed `limit_price`. The taker's remainder is updated in place.
    pub fn match_limit_buy(
        &mut self,
        taker_order_id: OrderId,
        limit_price: Price,
        remaining_base: &mut Quantity,
    ) -> Vec<Execution> {
        let mut executions = Vec::new();

        while remaining_base.is_positive() {
            let Some((price, level)) = self.asks.best_level_mut() else {
                break;
            };
            if price > limit_price {
                break;
            }

            let maker = level.front_mut().expect("levels are never empty");
            let executed = (*remaining_base).min(maker.remaining_base_quantity());
            maker.reduce(executed);
            *remaining_base -= executed;

            let maker_id = maker.order_id();
            let maker_filled = maker.is_filled();

            executions.push(Execution {
                buy_order_id: taker_order_id,
                sell_order_id: maker_id,
                quantity: executed,
                execution_price: price,
                buy_order_limit_price: limit_price,
                buy_fully_filled: remaining_base.is_zero(),
                sell_fully_filled: maker_filled,
            });

            if maker_filled {
                level.pop_front();
                self.index.remove(&maker_id);
            }
            if level.is_empty() {
                self.asks.remove_level(price);
            }
        }

        executions
    }

    /// Match a taker sell against the bids while the best bid is at least
    /// `limit_price`. The taker's remainder is updated in place.
    pub fn match_limit_sell(
        &mut self,
        taker_order_id: OrderId,
        limit_price: Price,
        remaining_base: &mut Quantity,
    ) -> Vec<Execution> {
        let mut executions = Vec::new();

        while remaining_base.is_positive() {
            let Some((price, level)) = self.bids.best_level_mut() else {
                break;
            };
            if price < limit_price {
                break;
            }

            let maker = level.front_mut().expect("levels are never empty");
            let executed = (*remaining_base).min(maker.remaining_base_quantity());
            maker.reduce(executed);
            *remaining_base -= executed;

            let maker_id = maker.order_id();
            let maker_limit_price = maker.limit_price();
            let maker_filled = maker.is_filled();

            executions.push(Execution {
                buy_order_id: maker_id,
                sell_order_id: taker_order_id,
                quantity: executed,
                execution_price: price,
                buy_order_limit_price: maker_limit_price,
                buy_fully_filled: maker_filled,
                sell_fully_filled: remaining_base.is_zero(),
            });

            if maker_filled {
                level.pop_front();
                self.index.remove(&maker_id);
            }
            if level.is_empty() {
                self.bids.remove_level(price);
            }
        }

        executions
    }

    /// Match a market buy denominated in quote units against the asks.
    ///
    /// The budget buys whole base units at each visited price. Once the
    /// remaining budget cannot pay for a single unit at the current best
    /// ask it cannot at any worse price either, so matching stops and the
    /// residual budget stays in `quote_budget`.
    pub fn match_market_buy_by_quote(
        &mut self,
        taker_order_id: OrderId,
        quote_budget: &mut Quantity,
    ) -> Vec<Execution> {
        let mut executions = Vec::new();

        loop {
            let Some((price, level)) = self.asks.best_level_mut() else {
                break;
            };

            let max_base_at_price = price.max_base_for(*quote_budget);
            if max_base_at_price.is_zero() {
                break;
            }

            let maker = level.front_mut().expect("levels are never empty");
            let executed = max_base_at_price.min(maker.remaining_base_quantity());
            maker.reduce(executed);
            *quote_budget -= price.notional(executed);

            let maker_id = maker.order_id();
            let maker_filled = maker.is_filled();

            executions.push(Execution {
                buy_order_id: taker_order_id,
                sell_order_id: maker_id,
                quantity: executed,
                execution_price: price,
                // A market buy reserves exactly the execution notional, so
                // there is never a price-improvement refund.
                buy_order_limit_price: price,
                buy_fully_filled: quote_budget.is_zero(),
                sell_fully_filled: maker_filled,
            });

            if maker_filled {
                level.pop_front();
                self.index.remove(&maker_id);
            }
            if level.is_empty() {
                self.asks.remove_level(price);
            }
        }

        executions
    }

    /// Match a market sell denominated in base units against the bids.
    pub fn match_market_sell_by_base(
        &mut self,
        taker_order_id: OrderId,
        base_quantity: &mut Quantity,
    ) -> Vec<Execution> {
        let mut executions = Vec::new();

        while base_quantity.is_positive() {
            let Some((price, level)) = self.bids.best_level_mut() else {
                break;
            };

            let maker = level.front_mut().expect("levels are never empty");
            let executed = (*base_quantity).min(maker.remaining_base_quantity());
            maker.reduce(executed);
            *base_quantity -= executed;

            let maker_id = maker.order_id();
            let maker_limit_price = maker.limit_price();
            let maker_filled = maker.is_filled();

            executions.push(Execution {
                buy_order_id: maker_id,
                sell_order_id: taker_order_id,
                quantity: executed,
                execution_price: price,
                buy_order_limit_price: maker_limit_price,
                buy_fully_filled: maker_filled,
                sell_fully_filled: base_quantity.is_zero(),
            });

            if maker_filled {
                level.pop_front();
                self.index.remove(&maker_id);
            }
            if level.is_empty() {
                self.bids.remove_level(price);
            }
        }

        executions
    }

    /// Rest an order at the tail of its price level
    ///
    /// # Panics
    /// Panics if the order id is already in the book.
    pub fn insert_resting(&mut self, side: Side, order: RestingOrder) {
        let prior = self.index.insert(order.order_id(), (side, order.limit_price()));
        assert!(prior.is_none(), "order id already resting in this book");

        match side {
            Side::Buy => self.bids.insert(order),
            Side::Sell => self.asks.insert(order),
        }
    }

    /// Cancel a resting order by id; `None` if the id is unknown
    pub fn cancel(&mut self, order_id: OrderId) -> Option<CancelResult> {
        let (side, price) = self.index.remove(&order_id)?;

        let removed = match side {
            Side::Buy => self.bids.remove(order_id, price),
            Side::Sell => self.asks.remove(order_id, price),
        };
        let order = removed.expect("index entries never dangle");

        Some(CancelResult {
            order_id,
            side,
            price,
            remaining_quantity: order.remaining_base_quantity(),
        })
    }

    /// Top-of-book bid price
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Top-of-book ask price
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Number of resting orders in the book
    pub fn open_order_count(&self) -> usize {
        self.index.len()
    }

    pub fn bids(&self) -> &BidBook {
        &self.bids
    }

    pub fn asks(&self) -> &AskBook {
        &self.asks
    }
}
