//! Promotion Applications

use smallvec::SmallVec;

use crate::{products::ProductKey, promotions::PromotionKind};

/// One firing of a promotion rule against an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionApplication {
    /// Kind of rule that fired
    pub kind: PromotionKind,

    /// Product declaring the rule
    pub product: ProductKey,

    /// Number of complete sets applied
    pub sets: u64,

    /// Units covered by the application per product: free units for freebies, consumed
    /// units otherwise
    pub units: SmallVec<[(ProductKey, u64); 4]>,

    /// Value of the covered units at base price
    pub original_price: u64,

    /// Amount charged for the covered units
    pub final_price: u64,
}

impl PromotionApplication {
    /// Amount saved against base price. Zero if the application cost more than base price.
    pub fn savings(&self) -> u64 {
        self.original_price.saturating_sub(self.final_price)
    }

    /// Total units covered.
    pub fn unit_count(&self) -> u64 {
        self.units.iter().map(|(_, units)| units).sum()
    }
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    fn application(original_price: u64, final_price: u64) -> PromotionApplication {
        PromotionApplication {
            kind: PromotionKind::MultiBuy,
            product: ProductKey::default(),
            sets: 1,
            units: smallvec![(ProductKey::default(), 3)],
            original_price,
            final_price,
        }
    }

    #[test]
    fn savings_returns_difference_between_original_and_final() {
        assert_eq!(application(150, 130).savings(), 20);
    }

    #[test]
    fn savings_floor_at_zero() {
        assert_eq!(application(100, 130).savings(), 0);
    }

    #[test]
    fn unit_count_sums_products() {
        let mut app = application(150, 130);
        app.units.push((ProductKey::default(), 2));

        assert_eq!(app.unit_count(), 5);
    }
}
