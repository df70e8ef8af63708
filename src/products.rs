//! Products

use std::{borrow::Borrow, fmt};

use slotmap::new_key_type;

use crate::prices::Price;

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Stock keeping unit: the opaque identifier customers order by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sku(String);

impl Sku {
    /// Create a SKU from any string-like value.
    pub fn new(sku: impl Into<String>) -> Self {
        Self(sku.into())
    }

    /// Return the SKU as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `token` has the shape of an identifier: an ASCII capital letter followed by
    /// capitals, digits or `_`. Offer text names products with the same shape.
    pub fn is_well_formed(token: &str) -> bool {
        let mut chars = token.chars();

        chars.next().is_some_and(|first| first.is_ascii_uppercase())
            && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
    }
}

impl Borrow<str> for Sku {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Sku {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Product SKU
    pub sku: Sku,

    /// Product base price
    pub price: Price,
}
