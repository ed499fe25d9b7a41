//! Order requests accepted by the matching engine

use types::ids::OrderId;
use types::market::Market;
use types::numeric::{Price, Quantity};
use types::order::Side;

/// A typed order request, routed by the engine to the market's book
///
/// Limit orders may rest; market orders never do. A market buy is
/// denominated in quote units (a spending budget), a market sell in base
/// units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderRequest {
    Limit {
        order_id: OrderId,
        market: Market,
        side: Side,
        limit_price: Price,
        base_quantity: Quantity,
    },
    MarketBuyByQuote {
        order_id: OrderId,
        market: Market,
        quote_budget: Quantity,
    },
    MarketSellByBase {
        order_id: OrderId,
        market: Market,
        base_quantity: Quantity,
    },
}

impl OrderRequest {
    /// The market this request is routed to
    pub fn market(&self) -> &Market {
        match self {
            OrderRequest::Limit { market, .. }
            | OrderRequest::MarketBuyByQuote { market, .. }
            | OrderRequest::MarketSellByBase { market, .. } => market,
        }
    }

    pub fn order_id(&self) -> OrderId {
        match self {
            OrderRequest::Limit { order_id, .. }
            | OrderRequest::MarketBuyByQuote { order_id, .. }
            | OrderRequest::MarketSellByBase { order_id, .. } => *order_id,
        }
    }
}
