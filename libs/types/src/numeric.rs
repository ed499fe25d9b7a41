//! Integer money types
//!
//! All prices and quantities are signed 64-bit integers in smallest units
//! (smallest currency unit, minimal lot unit). Deterministic by
//! construction: no floating point anywhere in the core.
//!
//! Overflow of `price × quantity` is a precondition violation, not a
//! runtime error; the checked helpers panic rather than return.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Price in smallest quote-currency units per base lot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Notional value `price × quantity`, in quote units
    ///
    /// # Panics
    /// Panics on 64-bit overflow; any product in the system must fit.
    pub fn notional(self, quantity: Quantity) -> Quantity {
        let product = self
            .0
            .checked_mul(quantity.get())
            .expect("notional price * quantity overflows i64");
        Quantity::new(product)
    }

    /// Whole base units purchasable with `budget` at this price
    /// (truncating integer division)
    ///
    /// # Panics
    /// Panics if the price is not positive.
    pub fn max_base_for(self, budget: Quantity) -> Quantity {
        assert!(self.0 > 0, "price must be positive");
        Quantity::new(budget.get() / self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity in smallest lot units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(i64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Smaller of two quantities
    pub fn min(self, other: Quantity) -> Quantity {
        Quantity(self.0.min(other.0))
    }
}

impl Add for Quantity {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).expect("quantity addition overflows i64"))
    }
}

impl AddAssign for Quantity {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Quantity {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_sub(rhs.0).expect("quantity subtraction overflows i64"))
    }
}

impl SubAssign for Quantity {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notional() {
        let price = Price::new(100);
        let quantity = Quantity::new(5);
        assert_eq!(price.notional(quantity), Quantity::new(500));
    }

    #[test]
    #[should_panic(expected = "overflows i64")]
    fn test_notional_overflow_panics() {
        Price::new(i64::MAX).notional(Quantity::new(2));
    }

    #[test]
    fn test_max_base_for_truncates() {
        let price = Price::new(100);
        // 401 quote buys 4 whole base units, 1 quote left over
        assert_eq!(price.max_base_for(Quantity::new(401)), Quantity::new(4));
        assert_eq!(price.max_base_for(Quantity::new(99)), Quantity::ZERO);
    }

    #[test]
    fn test_quantity_arithmetic() {
        let mut qty = Quantity::new(5);
        qty += Quantity::new(3);
        assert_eq!(qty, Quantity::new(8));
        qty -= Quantity::new(8);
        assert!(qty.is_zero());
    }

    #[test]
    fn test_quantity_min() {
        assert_eq!(Quantity::new(3).min(Quantity::new(7)), Quantity::new(3));
    }

    #[test]
    fn test_positivity_predicates() {
        assert!(Price::new(1).is_positive());
        assert!(!Price::new(0).is_positive());
        assert!(!Price::new(-5).is_positive());
        assert!(!Quantity::new(-1).is_positive());
    }
}
