//! Pricing
//!
//! [`Checkout`] runs the promotion pipeline over a [`Catalog`]:
//!
//! 1. count identifiers into an [`Order`]
//! 2. give away freebies
//! 3. charge group-buy sets
//! 4. charge multi-buy tiers and full-price leftovers
//!
//! The total is the group-buy charge plus the multi-buy and full-price charge.

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::{
    catalog::Catalog,
    input,
    order::Order,
    products::ProductKey,
    promotions::{freebie, group_buy, multi_buy},
    receipt::Receipt,
};

/// Errors that abort a pricing call. No partial total is ever produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The raw order is not a sequence of item identifiers.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An identifier has no catalog entry.
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// A product key does not belong to the catalog being priced against.
    #[error("Missing product")]
    MissingProduct(ProductKey),
}

/// Prices orders against a shared, read-only catalog.
#[derive(Debug, Clone, Copy)]
pub struct Checkout<'c> {
    catalog: &'c Catalog,
}

impl<'c> Checkout<'c> {
    /// Create a checkout over `catalog`.
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// The catalog orders are priced against.
    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Total for a sequence of identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownItem`] if any identifier is not in the catalog.
    pub fn price<I, S>(&self, skus: I) -> Result<u64, CheckoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.receipt(skus)?.total())
    }

    /// Total for a string where every character is one identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownItem`] if any character is not a catalog SKU.
    pub fn price_str(&self, skus: &str) -> Result<u64, CheckoutError> {
        Ok(self.settle(Order::from_chars(self.catalog, skus)?)?.total())
    }

    /// Total for loosely typed input: a string of single-character SKUs, or an array of
    /// SKU strings.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidInput`]: the value has any other shape.
    /// - [`CheckoutError::UnknownItem`]: an identifier is not in the catalog.
    pub fn price_input(&self, value: &Value) -> Result<u64, CheckoutError> {
        Ok(self.receipt(input::skus(value)?)?.total())
    }

    /// Full breakdown for a sequence of identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownItem`] if any identifier is not in the catalog.
    pub fn receipt<I, S>(&self, skus: I) -> Result<Receipt, CheckoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.settle(Order::from_skus(self.catalog, skus)?)
    }

    /// Run every promotion over an already counted order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingProduct`] if `order` was counted against a different
    /// catalog.
    #[instrument(skip_all, fields(units = order.units()))]
    pub fn settle(&self, mut order: Order) -> Result<Receipt, CheckoutError> {
        let subtotal = self.full_price(&order)?;
        let mut applications = Vec::new();
        let mut full_price = Vec::new();

        freebie::resolve(self.catalog, &mut order, &mut applications)?;

        let group_buy_subtotal = group_buy::resolve(self.catalog, &mut order, &mut applications)?;
        let multi_buy_subtotal =
            multi_buy::resolve(self.catalog, &order, &mut applications, &mut full_price)?;

        let total = group_buy_subtotal.saturating_add(multi_buy_subtotal);

        debug!(
            subtotal,
            total,
            group_buy_subtotal,
            multi_buy_subtotal,
            applications = applications.len(),
            "order priced"
        );

        Ok(Receipt::new(subtotal, total, applications, full_price))
    }

    fn full_price(&self, order: &Order) -> Result<u64, CheckoutError> {
        order.iter().try_fold(0u64, |acc, (key, quantity)| {
            let price = self
                .catalog
                .price(key)
                .ok_or(CheckoutError::MissingProduct(key))?;

            Ok(acc.saturating_add(price.times(quantity)))
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use crate::catalog::reference;

    use super::*;

    #[test]
    fn reference_orders_on_minimal_catalog() -> TestResult {
        let catalog = reference::minimal()?;
        let checkout = Checkout::new(&catalog);

        for (skus, expected) in [
            ("ABCD", 115),
            ("AABCCDD", 200),
            ("ACBDCDADD", 230),
            ("", 0),
            ("AAAAAAA", 310),
            ("BBBB", 90),
            ("DAABCAB", 210),
        ] {
            assert_eq!(checkout.price_str(skus)?, expected, "order {skus:?}");
        }

        Ok(())
    }

    #[test]
    fn unknown_item_fails() -> TestResult {
        let catalog = reference::minimal()?;
        let checkout = Checkout::new(&catalog);

        assert_eq!(
            checkout.price_str("ABF"),
            Err(CheckoutError::UnknownItem("F".to_string()))
        );

        Ok(())
    }

    #[test]
    fn price_accepts_any_string_sequence() -> TestResult {
        let catalog = reference::minimal()?;
        let checkout = Checkout::new(&catalog);

        let owned = vec!["A".to_string(), "B".to_string()];

        assert_eq!(checkout.price(["A", "B"])?, 80);
        assert_eq!(checkout.price(&owned)?, 80);

        Ok(())
    }

    #[test]
    fn price_input_rejects_wrong_shapes() -> TestResult {
        let catalog = reference::minimal()?;
        let checkout = Checkout::new(&catalog);

        assert_eq!(checkout.price_input(&json!("AAB"))?, 130);
        assert_eq!(checkout.price_input(&json!(["A", "B"]))?, 80);
        assert!(matches!(
            checkout.price_input(&json!(["A", ["B"]])),
            Err(CheckoutError::InvalidInput(_))
        ));
        assert!(matches!(
            checkout.price_input(&json!(42)),
            Err(CheckoutError::InvalidInput(_))
        ));

        Ok(())
    }

    #[test]
    fn huge_base_prices_saturate_instead_of_overflowing() -> TestResult {
        let catalog = crate::catalog::table::parse("| A | 18446744073709551615 | |")?;
        let checkout = Checkout::new(&catalog);

        assert_eq!(checkout.price_str("AA")?, u64::MAX);

        Ok(())
    }

    #[test]
    fn orders_from_another_catalog_are_rejected() -> TestResult {
        let minimal = reference::minimal()?;
        let mut builder = Catalog::builder();
        for sku in ["V", "W", "X", "Y", "Z"] {
            builder.add_product(sku, 5)?;
        }
        let other = builder.build()?;

        // Keys are slot indexes, so only the fifth product has no counterpart in `minimal`.
        let order = Order::from_chars(&other, "Z")?;
        let result = Checkout::new(&minimal).settle(order);

        assert!(matches!(result, Err(CheckoutError::MissingProduct(_))));

        Ok(())
    }
}
