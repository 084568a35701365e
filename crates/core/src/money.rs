//! Money as integer cents.
//!
//! Ingredient costs are decimal amounts with two places (`0.75`, `1.10`), so
//! they are held as whole cents to keep price sums exact.

use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// A non-negative amount of money in the smallest currency unit (cents).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Cost of `quantity` units priced at `self` each.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl ValueObject for Money {}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn displays_dollars_and_cents() {
        assert_eq!(Money::from_cents(275).to_string(), "$2.75");
        assert_eq!(Money::from_cents(330).to_string(), "$3.30");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn times_and_sum_match_unit_costs() {
        let coffee = Money::from_cents(75);
        let sugar = Money::from_cents(25);
        let total: Money = [coffee.times(3), sugar, sugar].into_iter().sum();
        assert_eq!(total, Money::from_cents(275));
    }

    proptest! {
        #[test]
        fn times_is_repeated_addition(cents in 0u64..10_000, quantity in 0u32..50) {
            let unit = Money::from_cents(cents);
            let summed: Money = std::iter::repeat(unit).take(quantity as usize).sum();
            prop_assert_eq!(unit.times(quantity), summed);
        }
    }
}
