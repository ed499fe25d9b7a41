//! In-book representation of a live order

use types::ids::OrderId;
use types::numeric::{Price, Quantity};

/// A resting limit order inside a price level
///
/// Invariant: `0 < remaining ≤ initial` and `limit_price > 0`. The only
/// mutation a resting order ever sees is `reduce` during a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestingOrder {
    order_id: OrderId,
    limit_price: Price,
    initial_base_quantity: Quantity,
    remaining_base_quantity: Quantity,
}

impl RestingOrder {
    /// Create a resting order
    ///
    /// `initial` is the quantity originally requested; `remaining` is what
    /// is left after any taker-phase fills.
    pub fn new(
        order_id: OrderId,
        limit_price: Price,
        initial_base_quantity: Quantity,
        remaining_base_quantity: Quantity,
    ) -> Self {
        assert!(order_id.is_valid(), "resting order id must be valid");
        assert!(limit_price.is_positive(), "resting order price must be positive");
        assert!(
            remaining_base_quantity.is_positive()
                && remaining_base_quantity <= initial_base_quantity,
            "resting order remaining must satisfy 0 < remaining <= initial"
        );

        Self {
            order_id,
            limit_price,
            initial_base_quantity,
            remaining_base_quantity,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn limit_price(&self) -> Price {
        self.limit_price
    }

    pub fn initial_base_quantity(&self) -> Quantity {
        self.initial_base_quantity
    }

    pub fn remaining_base_quantity(&self) -> Quantity {
        self.remaining_base_quantity
    }

    /// Reduce the remaining quantity by an executed amount
    pub fn reduce(&mut self, executed: Quantity) {
        assert!(executed.is_positive(), "executed quantity must be positive");
        assert!(
            executed <= self.remaining_base_quantity,
            "executed quantity exceeds remaining"
        );
        self.remaining_base_quantity -= executed;
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_base_quantity.is_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resting(quantity: i64) -> RestingOrder {
        RestingOrder::new(
            OrderId::new(1),
            Price::new(100),
            Quantity::new(quantity),
            Quantity::new(quantity),
        )
    }

    #[test]
    fn test_reduce_partial() {
        let mut order = resting(5);
        order.reduce(Quantity::new(2));
        assert_eq!(order.remaining_base_quantity(), Quantity::new(3));
        assert!(!order.is_filled());
    }

    #[test]
    fn test_reduce_to_filled() {
        let mut order = resting(5);
        order.reduce(Quantity::new(5));
        assert!(order.is_filled());
    }

    #[test]
    #[should_panic(expected = "exceeds remaining")]
    fn test_overreduce_panics() {
        let mut order = resting(5);
        order.reduce(Quantity::new(6));
    }

    #[test]
    #[should_panic(expected = "0 < remaining <= initial")]
    fn test_remaining_above_initial_panics() {
        RestingOrder::new(
            OrderId::new(1),
            Price::new(100),
            Quantity::new(2),
            Quantity::new(3),
        );
    }
}
