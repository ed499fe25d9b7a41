//! Execution and cancellation events produced by order books

use serde::{Deserialize, Serialize};
use types::ids::OrderId;
use types::numeric::{Price, Quantity};
use types::order::Side;

/// One matched fill between exactly two orders
///
/// The settlement layer consumes these in the order produced by the
/// matching walk. `buy_order_limit_price` is the price the buyer's
/// reservation was sized against; when it exceeds `execution_price` the
/// difference is refunded to the buyer's free balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub quantity: Quantity,
    /// Always the maker's resting limit price
    pub execution_price: Price,
    /// The buy side's limit price: the taker's limit for buy-initiated
    /// executions, the resting buyer's limit for sell-initiated ones
    pub buy_order_limit_price: Price,
    pub buy_fully_filled: bool,
    pub sell_fully_filled: bool,
}

/// Outcome of cancelling a resting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelResult {
    pub order_id: OrderId,
    pub side: Side,
    pub price: Price,
    pub remaining_quantity: Quantity,
}
