//! Trading pairs
//!
//! A market is an ordered pair of distinct assets. Identity is the ordered
//! pair: BTC/USDT and USDT/BTC are different markets.

use crate::asset::Asset;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trading pair: base asset priced in the quote asset
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Market {
    base: Asset,
    quote: Asset,
}

impl Market {
    /// Create a market from base and quote assets
    ///
    /// # Panics
    /// Panics if base and quote are the same asset.
    pub fn new(base: Asset, quote: Asset) -> Self {
        assert!(base != quote, "market base and quote must differ");
        Self { base, quote }
    }

    /// The asset being bought and sold
    pub fn base(&self) -> &Asset {
        &self.base
    }

    /// The unit of price
    pub fn quote(&self) -> &Asset {
        &self.quote
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}
