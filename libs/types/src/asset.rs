//! Asset symbols
//!
//! Symbols are case-insensitive and canonicalized to upper case on
//! construction; equality and hashing use the canonical form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A canonicalized asset symbol (e.g. `BTC`, `USDT`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Asset(String);

impl Asset {
    /// Create an asset from a symbol, canonicalizing to upper case
    ///
    /// # Panics
    /// Panics if the symbol is empty. Callers validate user input before
    /// constructing an `Asset`.
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        assert!(!symbol.is_empty(), "asset symbol must be non-empty");
        Self(symbol.to_ascii_uppercase())
    }

    /// The canonical symbol
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_canonicalized_to_upper() {
        assert_eq!(Asset::new("btc").as_str(), "BTC");
        assert_eq!(Asset::new("UsDt").as_str(), "USDT");
    }

    #[test]
    fn test_asset_equality_is_case_insensitive() {
        assert_eq!(Asset::new("btc"), Asset::new("BTC"));
    }

    #[test]
    fn test_asset_hash_uses_canonical_form() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Asset::new("eth"));
        assert!(set.contains(&Asset::new("ETH")));
    }

    #[test]
    #[should_panic(expected = "asset symbol must be non-empty")]
    fn test_empty_symbol_panics() {
        Asset::new("");
    }
}
