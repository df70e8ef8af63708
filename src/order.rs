//! Orders

use slotmap::SecondaryMap;

use crate::{catalog::Catalog, pricing::CheckoutError, products::ProductKey};

/// Quantities ordered per product.
///
/// Built once from raw identifiers, then only ever reduced as promotions consume units.
/// Iteration follows catalog declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    quantities: SecondaryMap<ProductKey, u64>,
}

impl Order {
    /// Count identifiers into an order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownItem`] for the first identifier the catalog does not
    /// contain.
    pub fn from_skus<I, S>(catalog: &Catalog, skus: I) -> Result<Self, CheckoutError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut quantities = SecondaryMap::new();

        for sku in skus {
            let sku = sku.as_ref();
            let key = catalog
                .key(sku)
                .ok_or_else(|| CheckoutError::UnknownItem(sku.to_string()))?;

            if let Some(quantity) = quantities.get_mut(key) {
                *quantity += 1;
            } else {
                quantities.insert(key, 1);
            }
        }

        Ok(Self { quantities })
    }

    /// Count every character of `skus` as one identifier.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::UnknownItem`] as [`from_skus`](Order::from_skus).
    pub fn from_chars(catalog: &Catalog, skus: &str) -> Result<Self, CheckoutError> {
        Self::from_skus(catalog, skus.chars().map(String::from))
    }

    /// Quantity currently held for a product, zero if it was never ordered.
    pub fn quantity(&self, key: ProductKey) -> u64 {
        self.quantities.get(key).copied().unwrap_or_default()
    }

    /// Whether the product was part of the order.
    pub fn contains(&self, key: ProductKey) -> bool {
        self.quantities.contains_key(key)
    }

    /// Remove up to `units` of a product, returning how many were removed.
    ///
    /// Quantities never go below zero and products outside the order are left alone.
    pub fn deduct(&mut self, key: ProductKey, units: u64) -> u64 {
        let Some(quantity) = self.quantities.get_mut(key) else {
            return 0;
        };

        let removed = units.min(*quantity);
        *quantity -= removed;

        removed
    }

    /// Iterate over `(product, quantity)` pairs, including exhausted products.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, u64)> + '_ {
        self.quantities.iter().map(|(key, quantity)| (key, *quantity))
    }

    /// Total units held.
    pub fn units(&self) -> u64 {
        self.quantities.values().sum()
    }

    /// Whether no units are held.
    pub fn is_empty(&self) -> bool {
        self.units() == 0
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::catalog::reference;

    use super::*;

    #[test]
    fn counts_identifiers_regardless_of_order() -> TestResult {
        let catalog = reference::minimal()?;

        let order = Order::from_chars(&catalog, "ACBDCDADD")?;
        let key = |sku: &str| catalog.key(sku).ok_or("missing");

        assert_eq!(order.quantity(key("A")?), 2);
        assert_eq!(order.quantity(key("B")?), 1);
        assert_eq!(order.quantity(key("C")?), 2);
        assert_eq!(order.quantity(key("D")?), 4);
        assert_eq!(order.units(), 9);

        Ok(())
    }

    #[test]
    fn unknown_identifier_fails_whole_order() -> TestResult {
        let catalog = reference::minimal()?;

        let result = Order::from_chars(&catalog, "ABF");

        assert_eq!(result, Err(CheckoutError::UnknownItem("F".to_string())));

        Ok(())
    }

    #[test]
    fn multi_character_identifiers() -> TestResult {
        let mut builder = Catalog::builder();
        builder.add_product("APPLE", 30)?.add_product("PEAR", 40)?;
        let catalog = builder.build()?;

        let order = Order::from_skus(&catalog, ["APPLE", "PEAR", "APPLE"])?;

        assert_eq!(order.quantity(catalog.key("APPLE").ok_or("missing")?), 2);

        Ok(())
    }

    #[test]
    fn deduct_floors_at_zero() -> TestResult {
        let catalog = reference::minimal()?;
        let a = catalog.key("A").ok_or("missing A")?;
        let b = catalog.key("B").ok_or("missing B")?;

        let mut order = Order::from_chars(&catalog, "AA")?;

        assert_eq!(order.deduct(a, 5), 2);
        assert_eq!(order.quantity(a), 0);
        assert_eq!(order.deduct(a, 1), 0);
        assert!(order.contains(a));

        assert_eq!(order.deduct(b, 1), 0);
        assert!(!order.contains(b));
        assert!(order.is_empty());

        Ok(())
    }

    #[test]
    fn empty_input_is_empty_order() -> TestResult {
        let catalog = reference::minimal()?;

        let order = Order::from_chars(&catalog, "")?;

        assert!(order.is_empty());
        assert_eq!(order.iter().count(), 0);

        Ok(())
    }
}
