//! Ask (sell-side) ladder
//!
//! Sell orders keyed by price, iterated best-first in ascending order.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Price;

use super::price_level::PriceLevel;
use super::resting_order::RestingOrder;

/// Sell-side price ladder; the lowest price is the best ask
#[derive(Debug, Clone, Default)]
pub struct AskBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl AskBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an order at the back of its price level, creating the level
    /// if needed
    pub fn insert(&mut self, order: RestingOrder) {
        self.levels
            .entry(order.limit_price())
            .or_default()
            .push_back(order);
    }

    /// The best (lowest) ask price
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next().copied()
    }

    /// Mutable access to the best price level
    pub fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next()
            .map(|(price, level)| (*price, level))
    }

    /// Remove an order from its level; drops the level if it empties
    pub fn remove(&mut self, order_id: OrderId, price: Price) -> Option<RestingOrder> {
        let level = self.levels.get_mut(&price)?;
        let removed = level.remove(order_id)?;
        if level.is_empty() {
            self.levels.remove(&price);
        }
        Some(removed)
    }

    /// Drop an emptied level
    pub fn remove_level(&mut self, price: Price) {
        let removed = self.levels.remove(&price);
        debug_assert!(
            removed.as_ref().is_some_and(|level| level.is_empty()),
            "only empty levels may be dropped"
        );
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Iterate levels best-first (ascending price)
    pub fn iter(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().map(|(price, level)| (*price, level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::numeric::Quantity;

    fn resting(id: u64, price: i64, quantity: i64) -> RestingOrder {
        RestingOrder::new(
            OrderId::new(id),
            Price::new(price),
            Quantity::new(quantity),
            Quantity::new(quantity),
        )
    }

    #[test]
    fn test_best_price_is_lowest() {
        let mut book = AskBook::new();
        book.insert(resting(1, 100, 1));
        book.insert(resting(2, 105, 1));
        book.insert(resting(3, 95, 1));

        assert_eq!(book.best_price(), Some(Price::new(95)));
    }

    #[test]
    fn test_remove_drops_empty_level() {
        let mut book = AskBook::new();
        book.insert(resting(1, 100, 2));
        book.insert(resting(2, 100, 3));

        book.remove(OrderId::new(1), Price::new(100));
        assert_eq!(book.level_count(), 1);
        book.remove(OrderId::new(2), Price::new(100));
        assert!(book.is_empty());
    }

    #[test]
    fn test_iter_best_first() {
        let mut book = AskBook::new();
        book.insert(resting(1, 100, 1));
        book.insert(resting(2, 105, 1));
        book.insert(resting(3, 95, 1));

        let prices: Vec<i64> = book.iter().map(|(p, _)| p.get()).collect();
        assert_eq!(prices, vec![95, 100, 105]);
    }
}
