//! Append-only per-market trade log

use std::collections::HashMap;
use types::market::Market;
use types::trade::Trade;

/// Trades grouped by market, insertion order preserved
///
/// Insertion order is the only ordering guarantee.
#[derive(Debug, Clone, Default)]
pub struct TradeHistory {
    trades: HashMap<Market, Vec<Trade>>,
}

impl TradeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trade to its market's log, creating the log if absent
    pub fn add(&mut self, trade: Trade) {
        self.trades.entry(trade.market.clone()).or_default().push(trade);
    }

    /// All trades recorded for a market; empty for an unknown market
    pub fn market_history(&self, market: &Market) -> &[Trade] {
        self.trades.get(market).map_or(&[], Vec::as_slice)
    }
}
