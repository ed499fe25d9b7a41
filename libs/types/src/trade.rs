//! Immutable trade records
//!
//! A trade is the settled outcome of one execution between exactly two
//! orders. Records are append-only; no field is ever mutated.

use crate::ids::{OrderId, TradeId, UserId};
use crate::market::Market;
use crate::numeric::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// One settled execution between a buyer and a seller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub buy_user: UserId,
    pub sell_user: UserId,
    pub buy_order: OrderId,
    pub sell_order: OrderId,
    pub market: Market,
    pub quantity: Quantity,
    pub price: Price,
}

impl Trade {
    /// Create a trade record
    ///
    /// # Panics
    /// Panics if any identifier is invalid, the two orders coincide, or
    /// quantity/price are not positive. Trades are only constructed from
    /// settled executions, so these are invariants rather than input checks.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trade_id: TradeId,
        buy_user: UserId,
        sell_user: UserId,
        buy_order: OrderId,
        sell_order: OrderId,
        market: Market,
        quantity: Quantity,
        price: Price,
    ) -> Self {
        assert!(trade_id.is_valid(), "trade id must be valid");
        assert!(buy_user.is_valid() && sell_user.is_valid(), "trade users must be valid");
        assert!(buy_order.is_valid() && sell_order.is_valid(), "trade orders must be valid");
        assert!(buy_order != sell_order, "a trade needs two distinct orders");
        assert!(quantity.is_positive(), "trade quantity must be positive");
        assert!(price.is_positive(), "trade price must be positive");

        Self {
            trade_id,
            buy_user,
            sell_user,
            buy_order,
            sell_order,
            market,
            quantity,
            price,
        }
    }

    /// Trade value `price × quantity` in quote units
    pub fn notional(&self) -> Quantity {
        self.price.notional(self.quantity)
    }
}
