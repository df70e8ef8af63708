//! Freebie Promotions
//!
//! Buy `threshold` of a trigger product, get `free` units of a target product at no cost.
//! When trigger and target are the same product, one full cycle uses `threshold + free`
//! units of that product.

use smallvec::smallvec;
use tracing::debug;

use crate::{
    catalog::Catalog,
    order::Order,
    pricing::CheckoutError,
    products::ProductKey,
    promotions::{PromotionKind, applications::PromotionApplication},
};

/// Buy-N-get-M-free rule, keyed on its trigger product in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freebie {
    threshold: u64,
    target: ProductKey,
    free: u64,
}

impl Freebie {
    /// Create a new freebie rule.
    pub fn new(threshold: u64, target: ProductKey, free: u64) -> Self {
        Self {
            threshold,
            target,
            free,
        }
    }

    /// Trigger units that must be bought per set.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Product given away.
    pub fn target(&self) -> ProductKey {
        self.target
    }

    /// Units given away per set.
    pub fn free(&self) -> u64 {
        self.free
    }

    /// Trigger units one set uses up.
    pub fn unit_cost(&self, trigger: ProductKey) -> u64 {
        if trigger == self.target {
            self.threshold.saturating_add(self.free)
        } else {
            self.threshold
        }
    }
}

/// Remove free units from `order`.
///
/// Trigger quantities are read from the order as it was on entry, so one rule giving away
/// units of another trigger does not change how often that trigger fires.
///
/// # Errors
///
/// Returns [`CheckoutError::MissingProduct`] if a rule targets a product that is not in
/// `catalog`.
pub fn resolve(
    catalog: &Catalog,
    order: &mut Order,
    applications: &mut Vec<PromotionApplication>,
) -> Result<(), CheckoutError> {
    let normalized = order.clone();

    for (trigger, rules) in catalog.freebie_triggers() {
        if !normalized.contains(trigger) {
            continue;
        }

        let mut available = normalized.quantity(trigger);

        for rule in rules {
            let unit_cost = rule.unit_cost(trigger);
            let sets = available / unit_cost;

            available %= unit_cost;

            if sets == 0 {
                continue;
            }

            let removed = order.deduct(rule.target, sets.saturating_mul(rule.free));

            debug!(
                ?trigger,
                target = ?rule.target,
                sets,
                removed,
                "freebie applied"
            );

            if removed == 0 {
                continue;
            }

            let price = catalog
                .price(rule.target)
                .ok_or(CheckoutError::MissingProduct(rule.target))?;

            applications.push(PromotionApplication {
                kind: PromotionKind::Freebie,
                product: trigger,
                sets,
                units: smallvec![(rule.target, removed)],
                original_price: price.times(removed),
                final_price: 0,
            });
        }
    }

    Ok(())
}
