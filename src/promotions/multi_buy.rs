//! Multi-buy Promotions

use smallvec::smallvec;
use tracing::debug;

use crate::{
    catalog::Catalog,
    order::Order,
    prices::Price,
    pricing::CheckoutError,
    promotions::{PromotionKind, applications::PromotionApplication},
    receipt::FullPriceLine,
};

/// Buy `threshold` units of a product for a flat `price`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiBuy {
    threshold: u64,
    price: Price,
}

impl MultiBuy {
    /// Create a new multi-buy tier.
    pub fn new(threshold: u64, price: Price) -> Self {
        Self { threshold, price }
    }

    /// Units per set.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Flat price of one set.
    pub fn price(&self) -> Price {
        self.price
    }
}

/// Price every unit left in `order`.
///
/// Tiers are taken largest first, each on what the previous tier left over; the remainder
/// is charged at base price and reported as a [`FullPriceLine`].
///
/// # Errors
///
/// Returns [`CheckoutError::MissingProduct`] if the order holds a product that is not in
/// `catalog`.
pub fn resolve(
    catalog: &Catalog,
    order: &Order,
    applications: &mut Vec<PromotionApplication>,
    full_price: &mut Vec<FullPriceLine>,
) -> Result<u64, CheckoutError> {
    let mut subtotal: u64 = 0;

    for (key, quantity) in order.iter() {
        if quantity == 0 {
            continue;
        }

        let base = catalog
            .price(key)
            .ok_or(CheckoutError::MissingProduct(key))?;

        let mut remaining = quantity;

        for tier in catalog.multi_buys(key) {
            let sets = remaining / tier.threshold;

            if sets == 0 {
                continue;
            }

            let units = sets * tier.threshold;
            let charged = tier.price.times(sets);

            debug!(product = ?key, threshold = tier.threshold, sets, charged, "multi-buy applied");

            remaining %= tier.threshold;
            subtotal = subtotal.saturating_add(charged);

            applications.push(PromotionApplication {
                kind: PromotionKind::MultiBuy,
                product: key,
                sets,
                units: smallvec![(key, units)],
                original_price: base.times(units),
                final_price: charged,
            });
        }

        if remaining > 0 {
            let charged = base.times(remaining);

            subtotal = subtotal.saturating_add(charged);

            full_price.push(FullPriceLine {
                product: key,
                quantity: remaining,
                price: charged,
            });
        }
    }

    Ok(subtotal)
}
