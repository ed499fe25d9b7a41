//! Price level with FIFO queue
//!
//! A price level holds all resting orders at one price in strict
//! insertion order, enforcing time priority. Levels are non-empty by
//! construction; the owning ladder removes a level when its last order
//! goes away.

use std::collections::VecDeque;
use types::ids::OrderId;
use types::numeric::Quantity;

use super::resting_order::RestingOrder;

/// Orders at a single price, oldest first
#[derive(Debug, Clone, Default)]
pub struct PriceLevel {
    orders: VecDeque<RestingOrder>,
}

impl PriceLevel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an order at the back of the queue (time priority)
    pub fn push_back(&mut self, order: RestingOrder) {
        self.orders.push_back(order);
    }

    /// The oldest order at this price
    pub fn front_mut(&mut self) -> Option<&mut RestingOrder> {
        self.orders.front_mut()
    }

    /// Remove and return the oldest order
    pub fn pop_front(&mut self) -> Option<RestingOrder> {
        self.orders.pop_front()
    }

    /// Remove an order by id, preserving the order of the rest
    pub fn remove(&mut self, order_id: OrderId) -> Option<RestingOrder> {
        let position = self.orders.iter().position(|o| o.order_id() == order_id)?;
        self.orders.remove(position)
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    /// Total remaining quantity at this level
    pub fn total_quantity(&self) -> Quantity {
        self.orders
            .iter()
            .fold(Quantity::ZERO, |sum, o| sum + o.remaining_base_quantity())
    }

    /// Iterate the queue oldest-first
    pub fn iter(&self) -> impl Iterator<Item = &RestingOrder> {
        self.orders.iter()
    }
}
