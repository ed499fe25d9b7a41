//! Unique identifier types for exchange entities
//!
//! All identifiers are opaque 64-bit integers. The value 0 is reserved as
//! the invalid/default identifier and is never handed out by a generator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Create from a raw value
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Identifiers are valid iff non-zero
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Get the raw value
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a trade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(u64);

impl TradeId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for TradeId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic identifier generator
///
/// `next()` returns strictly increasing positive values starting at 1.
/// Values are never reused within a process lifetime. The atomic counter is
/// a defensive measure; the baseline design calls it from a single thread.
#[derive(Debug)]
pub struct IdGenerator<T> {
    counter: AtomicU64,
    _id: PhantomData<T>,
}

impl<T: From<u64>> IdGenerator<T> {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
            _id: PhantomData,
        }
    }

    /// Allocate the next identifier
    pub fn next(&self) -> T {
        T::from(self.counter.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl<T: From<u64>> Default for IdGenerator<T> {
    fn default() -> Self {
        Self::new()
    }
}
