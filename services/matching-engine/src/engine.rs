//! Matching engine core
//!
//! Owns one order book per registered market and dispatches typed order
//! requests to the right book. Market registration is checked by the
//! settlement layer; submitting to an unregistered market is a
//! precondition violation and aborts.

use std::collections::HashMap;
use types::ids::OrderId;
use types::market::Market;
use types::numeric::{Price, Quantity};
use types::order::Side;

use crate::book::{OrderBook, RestingOrder};
use crate::events::{CancelResult, Execution};
use crate::requests::OrderRequest;

/// Result of submitting an order request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Fills in the order the matching walk produced them
    pub executions: Vec<Execution>,
    /// Unfilled remainder: base units for limit and market-sell requests,
    /// quote units for market-buy requests
    pub remaining: Quantity,
}

/// Market registry and request dispatcher
#[derive(Debug, Default)]
pub struct MatchingEngine {
    books: HashMap<Market, OrderBook>,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new market with an empty book
    ///
    /// # Panics
    /// Panics if the market is already registered; the caller checks
    /// `has_market` first.
    pub fn register_market(&mut self, market: Market) {
        assert!(
            !self.has_market(&market),
            "market is already registered"
        );
        self.books.insert(market.clone(), OrderBook::new(market));
    }

    pub fn has_market(&self, market: &Market) -> bool {
        self.books.contains_key(market)
    }

    /// Match an order request against its market's book
    ///
    /// Limit remainders rest in the book; market remainders are handed
    /// back for the settlement layer to release.
    pub fn submit(&mut self, request: OrderRequest) -> MatchOutcome {
        let book = self.book_mut(request.market().clone());

        match request {
            OrderRequest::Limit {
                order_id,
                side,
                limit_price,
                base_quantity,
                ..
            } => {
                let mut remaining = base_quantity;
                let executions = match side {
                    Side::Buy => book.match_limit_buy(order_id, limit_price, &mut remaining),
                    Side::Sell => book.match_limit_sell(order_id, limit_price, &mut remaining),
                };

                if remaining.is_positive() {
                    book.insert_resting(
                        side,
                        RestingOrder::new(order_id, limit_price, base_quantity, remaining),
                    );
                }

                MatchOutcome { executions, remaining }
            }
            OrderRequest::MarketBuyByQuote {
                order_id,
                quote_budget,
                ..
            } => {
                let mut remaining = quote_budget;
                let executions = book.match_market_buy_by_quote(order_id, &mut remaining);
                MatchOutcome { executions, remaining }
            }
            OrderRequest::MarketSellByBase {
                order_id,
                base_quantity,
                ..
            } => {
                let mut remaining = base_quantity;
                let executions = book.match_market_sell_by_base(order_id, &mut remaining);
                MatchOutcome { executions, remaining }
            }
        }
    }

    /// Cancel a resting order in a market's book
    pub fn cancel(&mut self, market: &Market, order_id: OrderId) -> Option<CancelResult> {
        self.book_mut(market.clone()).cancel(order_id)
    }

    pub fn best_bid(&self, market: &Market) -> Option<Price> {
        self.book(market).best_bid()
    }

    pub fn best_ask(&self, market: &Market) -> Option<Price> {
        self.book(market).best_ask()
    }

    fn book(&self, market: &Market) -> &OrderBook {
        self.books
            .get(market)
            .expect("market must be registered before use")
    }

    fn book_mut(&mut self, market: Market) -> &mut OrderBook {
        self.books
            .get_mut(&market)
            .expect("market must be registered before use")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::asset::Asset;

    fn btc_usdt() -> Market {
        Market::new(Asset::new("BTC"), Asset::new("USDT"))
    }

    fn engine_with_market() -> MatchingEngine {
        let mut engine = MatchingEngine::new();
        engine.register_market(btc_usdt());
        engine
    }

    fn limit(id: u64, side: Side, price: i64, quantity: i64) -> OrderRequest {
        OrderRequest::Limit {
            order_id: OrderId::new(id),
            market: btc_usdt(),
            side,
            limit_price: Price::new(price),
            base_quantity: Quantity::new(quantity),
        }
    }

    #[test]
    fn test_register_and_has_market() {
        let engine = engine_with_market();
        assert!(engine.has_market(&btc_usdt()));

        let other = Market::new(Asset::new("ETH"), Asset::new("USDT"));
        assert!(!engine.has_market(&other));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_double_register_panics() {
        let mut engine = engine_with_market();
        engine.register_market(btc_usdt());
    }

    #[test]
    #[should_panic(expected = "must be registered")]
    fn test_submit_to_unknown_market_panics() {
        let mut engine = MatchingEngine::new();
        engine.submit(limit(1, Side::Buy, 100, 1));
    }

    #[test]
    fn test_limit_remainder_rests() {
        let mut engine = engine_with_market();

        let outcome = engine.submit(limit(1, Side::Sell, 100, 5));
        assert!(outcome.executions.is_empty());
        assert_eq!(outcome.remaining, Quantity::new(5));
        assert_eq!(engine.best_ask(&btc_usdt()), Some(Price::new(100)));
    }

    #[test]
    fn test_crossing_limit_orders_fill() {
        let mut engine = engine_with_market();
        engine.submit(limit(1, Side::Sell, 100, 5));

        let outcome = engine.submit(limit(2, Side::Buy, 110, 5));
        assert_eq!(outcome.executions.len(), 1);
        assert_eq!(outcome.executions[0].execution_price, Price::new(100));
        assert!(outcome.remaining.is_zero());

        // both sides gone from the book
        assert!(engine.best_ask(&btc_usdt()).is_none());
        assert!(engine.best_bid(&btc_usdt()).is_none());
    }

    #[test]
    fn test_market_buy_remainder_does_not_rest() {
        let mut engine = engine_with_market();
        engine.submit(limit(1, Side::Sell, 100, 2));

        let outcome = engine.submit(OrderRequest::MarketBuyByQuote {
            order_id: OrderId::new(2),
            market: btc_usdt(),
            quote_budget: Quantity::new(250),
        });

        assert_eq!(outcome.executions.len(), 1);
        assert_eq!(outcome.executions[0].quantity, Quantity::new(2));
        // 50 quote left over, nothing rests on the bid side
        assert_eq!(outcome.remaining, Quantity::new(50));
        assert!(engine.best_bid(&btc_usdt()).is_none());
    }

    #[test]
    fn test_market_sell_remainder_does_not_rest() {
        let mut engine = engine_with_market();
        engine.submit(limit(1, Side::Buy, 100, 2));

        let outcome = engine.submit(OrderRequest::MarketSellByBase {
            order_id: OrderId::new(2),
            market: btc_usdt(),
            base_quantity: Quantity::new(5),
        });

        assert_eq!(outcome.executions.len(), 1);
        assert_eq!(outcome.remaining, Quantity::new(3));
        assert!(engine.best_ask(&btc_usdt()).is_none());
    }

    #[test]
    fn test_cancel_routes_to_market_book() {
        let mut engine = engine_with_market();
        engine.submit(limit(1, Side::Buy, 100, 5));

        let result = engine.cancel(&btc_usdt(), OrderId::new(1)).unwrap();
        assert_eq!(result.remaining_quantity, Quantity::new(5));
        assert!(engine.cancel(&btc_usdt(), OrderId::new(1)).is_none());
    }

    #[test]
    fn test_books_are_isolated_per_market() {
        let mut engine = engine_with_market();
        let eth_usdt = Market::new(Asset::new("ETH"), Asset::new("USDT"));
        engine.register_market(eth_usdt.clone());

        engine.submit(limit(1, Side::Sell, 100, 5));
        assert_eq!(engine.best_ask(&btc_usdt()), Some(Price::new(100)));
        assert!(engine.best_ask(&eth_usdt).is_none());
    }
}
