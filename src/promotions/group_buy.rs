//! Group-buy Promotions
//!
//! Any `threshold` units drawn from a set of products cost a flat `price`. Consumed units
//! are taken from the most expensive accepted products first.
//!
//! Every rule pools against the quantities held when the group-buy step starts. Two rules
//! whose accepted sets overlap can therefore both count the same units; only the second
//! deduction finds them gone.

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    catalog::Catalog,
    order::Order,
    prices::Price,
    pricing::CheckoutError,
    products::ProductKey,
    promotions::{PromotionKind, applications::PromotionApplication},
};

/// Pooled threshold rule across several products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBuy {
    threshold: u64,
    price: Price,
    accepted: SmallVec<[ProductKey; 5]>,
}

impl GroupBuy {
    /// Create a new group-buy rule. `accepted` must already be in deduction order.
    pub fn new(threshold: u64, price: Price, accepted: SmallVec<[ProductKey; 5]>) -> Self {
        Self {
            threshold,
            price,
            accepted,
        }
    }

    /// Pooled units per set.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Flat price of one set.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Accepted products, most expensive first.
    pub fn accepted(&self) -> &[ProductKey] {
        &self.accepted
    }

    /// Units of the accepted products held by `order`.
    pub fn pooled(&self, order: &Order) -> u64 {
        self.accepted.iter().map(|key| order.quantity(*key)).sum()
    }
}

/// Apply every group-buy rule in the catalog, deducting consumed units from `order`.
///
/// Returns the amount charged for all group-buy sets.
///
/// # Errors
///
/// Returns [`CheckoutError::MissingProduct`] if a rule accepts a product that is not in
/// `catalog`.
pub fn resolve(
    catalog: &Catalog,
    order: &mut Order,
    applications: &mut Vec<PromotionApplication>,
) -> Result<u64, CheckoutError> {
    let snapshot = order.clone();
    let mut subtotal: u64 = 0;

    for (owner, rules) in catalog.group_buy_owners() {
        for rule in rules {
            let pooled = rule.pooled(&snapshot);

            if pooled < rule.threshold {
                continue;
            }

            let sets = pooled / rule.threshold;
            let charged = rule.price.times(sets);
            let mut remaining = sets * rule.threshold;
            let mut units = SmallVec::new();
            let mut original_price: u64 = 0;

            for &key in &rule.accepted {
                if remaining == 0 {
                    break;
                }

                let removed = order.deduct(key, remaining);

                if removed == 0 {
                    continue;
                }

                let price = catalog
                    .price(key)
                    .ok_or(CheckoutError::MissingProduct(key))?;

                remaining -= removed;
                original_price = original_price.saturating_add(price.times(removed));
                units.push((key, removed));
            }

            debug!(?owner, pooled, sets, charged, unmatched = remaining, "group-buy applied");

            subtotal = subtotal.saturating_add(charged);

            applications.push(PromotionApplication {
                kind: PromotionKind::GroupBuy,
                product: owner,
                sets,
                units,
                original_price,
                final_price: charged,
            });
        }
    }

    Ok(subtotal)
}
