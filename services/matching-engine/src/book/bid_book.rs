//! Bid (buy-side) ladder
//!
//! Buy orders keyed by price, iterated best-first in descending order.
//! BTreeMap keeps iteration deterministic.

use std::collections::BTreeMap;
use types::ids::OrderId;
use types::numeric::Price;

use super::price_level::PriceLevel;
use super::resting_order::RestingOrder;

/// Buy-side price ladder; the highest price is the best bid
#[derive(Debug, Clone, Default)]
pub struct BidBook {
    levels: BTreeMap<Price, PriceLevel>,
}

impl BidBook {
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

    /// The best (highest) bid price
    pub fn best_price(&self) -> Option<Price> {
        self.levels.keys().next_back().copied()
    }

    /// Mutable access to the best price level
    pub fn best_level_mut(&mut self) -> Option<(Price, &mut PriceLevel)> {
        self.levels
            .iter_mut()
            .next_back()
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

    /// Iterate levels best-first (descending price)
    pub fn iter(&self) -> impl Iterator<Item = (Price, &PriceLevel)> {
        self.levels.iter().rev().map(|(price, level)| (*price, level))
    }
}
