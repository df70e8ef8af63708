//! Catalog Builder

use std::cmp::Reverse;

use rustc_hash::FxHashMap;
use slotmap::{SecondaryMap, SlotMap};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::{
    catalog::{Catalog, CatalogError, offers::Offer},
    prices::Price,
    products::{Product, ProductKey, Sku},
    promotions::{freebie::Freebie, group_buy::GroupBuy, multi_buy::MultiBuy},
};

/// Collects products and offers, then validates them into a [`Catalog`].
///
/// Offers are stored by SKU until [`build`](CatalogBuilder::build) so that a row may refer
/// to products declared further down.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    products: SlotMap<ProductKey, Product>,
    skus: FxHashMap<Sku, ProductKey>,
    offers: Vec<(ProductKey, Offer)>,
}

impl CatalogBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a product.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidSku`]: the SKU is not a capital letter followed by capitals,
    ///   digits or `_`.
    /// - [`CatalogError::DuplicateSku`]: the SKU was already declared.
    /// - [`CatalogError::NonPositivePrice`]: the price is zero.
    pub fn add_product(
        &mut self,
        sku: &str,
        price: impl Into<Price>,
    ) -> Result<&mut Self, CatalogError> {
        let price = price.into();

        if !Sku::is_well_formed(sku) {
            return Err(CatalogError::InvalidSku(sku.to_string()));
        }

        if self.skus.contains_key(sku) {
            return Err(CatalogError::DuplicateSku(sku.to_string()));
        }

        if price.is_zero() {
            return Err(CatalogError::NonPositivePrice(sku.to_string()));
        }

        let sku = Sku::new(sku);
        let key = self.products.insert(Product {
            sku: sku.clone(),
            price,
        });

        self.skus.insert(sku, key);

        Ok(self)
    }

    /// Attach an offer to the row declaring `sku`.
    ///
    /// Multi-buys and freebies must require the declaring SKU itself; group-buys must
    /// include it in their accepted set.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnknownProduct`]: `sku` has not been declared.
    /// - [`CatalogError::ForeignOffer`]: the offer belongs to another row.
    pub fn add_offer(&mut self, sku: &str, offer: Offer) -> Result<&mut Self, CatalogError> {
        let key = self
            .skus
            .get(sku)
            .copied()
            .ok_or_else(|| CatalogError::UnknownProduct {
                sku: sku.to_string(),
                referenced: sku.to_string(),
            })?;

        if !offer.is_declarable_by(sku) {
            return Err(CatalogError::ForeignOffer {
                sku: sku.to_string(),
                required: offer.required_sku().to_string(),
            });
        }

        self.offers.push((key, offer));

        Ok(self)
    }

    /// Resolve all offers and produce the immutable catalog.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::UnknownProduct`]: an offer refers to an undeclared SKU.
    /// - [`CatalogError::InvalidOffer`]: an offer has a zero threshold, free quantity or
    ///   price.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let Self {
            products,
            skus,
            offers,
        } = self;

        let mut multi_buys: SecondaryMap<ProductKey, SmallVec<[MultiBuy; 2]>> =
            SecondaryMap::new();
        let mut freebies: SecondaryMap<ProductKey, SmallVec<[Freebie; 2]>> = SecondaryMap::new();
        let mut group_buys: SecondaryMap<ProductKey, SmallVec<[GroupBuy; 1]>> =
            SecondaryMap::new();

        let resolver = Resolver {
            products: &products,
            skus: &skus,
        };

        for (key, offer) in offers {
            let declared_by = resolver.sku_of(key);

            match offer {
                Offer::MultiBuy {
                    quantity, price, ..
                } => {
                    let rule = resolver.multi_buy(key, &declared_by, quantity, price)?;

                    push_rule(&mut multi_buys, key, rule);
                }
                Offer::Freebie {
                    quantity,
                    free_sku,
                    free_quantity,
                    ..
                } => {
                    let rule = resolver.freebie(&declared_by, quantity, &free_sku, free_quantity)?;

                    push_rule(&mut freebies, key, rule);
                }
                Offer::GroupBuy {
                    quantity,
                    skus: accepted,
                    price,
                } => {
                    let rule = resolver.group_buy(&declared_by, quantity, &accepted, price)?;

                    push_rule(&mut group_buys, key, rule);
                }
            }
        }

        for rules in multi_buys.values_mut() {
            rules.sort_by_key(|rule| Reverse(rule.threshold()));
        }

        for rules in freebies.values_mut() {
            rules.sort_by_key(|rule| Reverse(rule.threshold()));
        }

        for rules in group_buys.values_mut() {
            rules.sort_by_key(|rule| Reverse(rule.threshold()));
        }

        debug!(
            products = products.len(),
            multi_buys = multi_buys.values().map(SmallVec::len).sum::<usize>(),
            freebies = freebies.values().map(SmallVec::len).sum::<usize>(),
            group_buys = group_buys.values().map(SmallVec::len).sum::<usize>(),
            "catalog built"
        );

        Ok(Catalog {
            products,
            skus,
            multi_buys,
            freebies,
            group_buys,
        })
    }
}

fn push_rule<A: smallvec::Array>(
    rules: &mut SecondaryMap<ProductKey, SmallVec<A>>,
    key: ProductKey,
    rule: A::Item,
) {
    if let Some(existing) = rules.get_mut(key) {
        existing.push(rule);
    } else {
        let mut fresh = SmallVec::new();
        fresh.push(rule);
        rules.insert(key, fresh);
    }
}

/// Turns SKU-keyed offers into key-resolved rules.
struct Resolver<'b> {
    products: &'b SlotMap<ProductKey, Product>,
    skus: &'b FxHashMap<Sku, ProductKey>,
}

impl Resolver<'_> {
    fn sku_of(&self, key: ProductKey) -> String {
        self.products
            .get(key)
            .map(|product| product.sku.to_string())
            .unwrap_or_default()
    }

    fn lookup(&self, declared_by: &str, sku: &Sku) -> Result<ProductKey, CatalogError> {
        self.skus
            .get(sku)
            .copied()
            .ok_or_else(|| CatalogError::UnknownProduct {
                sku: declared_by.to_string(),
                referenced: sku.to_string(),
            })
    }

    fn multi_buy(
        &self,
        key: ProductKey,
        declared_by: &str,
        quantity: u64,
        price: Price,
    ) -> Result<MultiBuy, CatalogError> {
        ensure(quantity > 0, declared_by, "multi-buy quantity must be positive")?;
        ensure(!price.is_zero(), declared_by, "multi-buy price must be positive")?;

        let Some(product) = self.products.get(key) else {
            return Ok(MultiBuy::new(quantity, price));
        };

        let Some(base_price) = product.price.checked_times(quantity) else {
            return Err(CatalogError::InvalidOffer {
                sku: declared_by.to_string(),
                reason: "multi-buy quantity is too large to price",
            });
        };

        if *price >= base_price {
            warn!(
                sku = declared_by,
                quantity,
                price = *price,
                base_price = *product.price,
                "multi-buy offer does not save anything over the base price"
            );
        }

        Ok(MultiBuy::new(quantity, price))
    }

    fn freebie(
        &self,
        declared_by: &str,
        quantity: u64,
        free_sku: &Sku,
        free_quantity: u64,
    ) -> Result<Freebie, CatalogError> {
        ensure(quantity > 0, declared_by, "freebie quantity must be positive")?;
        ensure(free_quantity > 0, declared_by, "free quantity must be positive")?;
        ensure(
            quantity.checked_add(free_quantity).is_some(),
            declared_by,
            "freebie quantities are too large",
        )?;

        let target = self.lookup(declared_by, free_sku)?;

        Ok(Freebie::new(quantity, target, free_quantity))
    }

    fn group_buy(
        &self,
        declared_by: &str,
        quantity: u64,
        accepted: &[Sku],
        price: Price,
    ) -> Result<GroupBuy, CatalogError> {
        ensure(quantity > 0, declared_by, "group-buy quantity must be positive")?;
        ensure(!price.is_zero(), declared_by, "group-buy price must be positive")?;

        let mut members: SmallVec<[(ProductKey, Price); 5]> = SmallVec::new();

        for sku in accepted {
            let key = self.lookup(declared_by, sku)?;

            if members.iter().any(|(existing, _)| *existing == key) {
                continue;
            }

            let price = self.products.get(key).map(|p| p.price).unwrap_or_default();

            members.push((key, price));
        }

        ensure(
            !members.is_empty(),
            declared_by,
            "group-buy must accept at least one SKU",
        )?;

        // Deduction order: most expensive first, declaration order between equal prices.
        members.sort_by_key(|(key, price)| (Reverse(*price), *key));

        Ok(GroupBuy::new(
            quantity,
            price,
            members.into_iter().map(|(key, _)| key).collect(),
        ))
    }
}

fn ensure(condition: bool, sku: &str, reason: &'static str) -> Result<(), CatalogError> {
    if condition {
        Ok(())
    } else {
        Err(CatalogError::InvalidOffer {
            sku: sku.to_string(),
            reason,
        })
    }
}
