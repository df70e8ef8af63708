//! Prices

use std::{fmt, ops::Deref};

/// A price in minor units (pence/cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price {
    value: u64,
}

impl Price {
    /// Creates a new price from minor units.
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Price of `quantity` units at this price, saturating at `u64::MAX`.
    pub const fn times(self, quantity: u64) -> u64 {
        self.value.saturating_mul(quantity)
    }

    /// Price of `quantity` units at this price, or `None` on overflow.
    pub const fn checked_times(self, quantity: u64) -> Option<u64> {
        self.value.checked_mul(quantity)
    }

    /// Whether this price is zero.
    pub const fn is_zero(self) -> bool {
        self.value == 0
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<u64> for Price {
    fn from(value: u64) -> Self {
        Price::new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(1000);

        assert_eq!(price.value, 1000);
    }

    #[test]
    fn price_derefs_to_u64() {
        let price = Price { value: 100 };

        assert_eq!(*price, 100);
    }

    #[test]
    fn times_multiplies_by_quantity() {
        assert_eq!(Price::new(50).times(3), 150);
        assert_eq!(Price::new(50).times(0), 0);
    }

    #[test]
    fn times_saturates_on_overflow() {
        assert_eq!(Price::new(50).times(u64::MAX), u64::MAX);
        assert_eq!(Price::new(50).checked_times(u64::MAX), None);
        assert_eq!(Price::new(50).checked_times(3), Some(150));
    }

    #[test]
    fn prices_order_by_value() {
        let mut prices = [Price::new(30), Price::new(90), Price::new(10)];
        prices.sort_unstable();

        assert_eq!(prices, [Price::new(10), Price::new(30), Price::new(90)]);
    }
}
