//! Catalog
//!
//! The read-only price list and promotion tables every pricing call is evaluated against.
//! A [`Catalog`] is built once through [`CatalogBuilder`] (directly, from a fixed-width
//! table, or from a YAML fixture) and shared by reference afterwards.

use rustc_hash::FxHashMap;
use slotmap::{SecondaryMap, SlotMap};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    prices::Price,
    products::{Product, ProductKey, Sku},
    promotions::{freebie::Freebie, group_buy::GroupBuy, multi_buy::MultiBuy},
};

mod builder;
pub mod fixture;
pub mod offers;
pub mod reference;
pub mod table;

pub use builder::CatalogBuilder;

/// Errors raised while loading or building a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A table row could not be split into SKU, price and offers cells.
    #[error("Malformed catalog row {line}: {content}")]
    MalformedRow {
        /// 1-based line number in the source
        line: usize,
        /// Raw row content
        content: String,
    },

    /// A SKU is empty or contains whitespace or separators.
    #[error("Invalid SKU: {0:?}")]
    InvalidSku(String),

    /// The same SKU was declared twice.
    #[error("Duplicate entry found in catalog for {0}")]
    DuplicateSku(String),

    /// A price cell is not an unsigned integer.
    #[error("Invalid price for {sku}: {value:?}")]
    InvalidPrice {
        /// SKU of the offending row
        sku: String,
        /// Raw price text
        value: String,
    },

    /// A base price of zero.
    #[error("Incorrect price detected for {0}")]
    NonPositivePrice(String),

    /// Offer text did not match any known offer form.
    #[error("Malformed offer for {sku}: {offer:?}")]
    MalformedOffer {
        /// SKU of the declaring row
        sku: String,
        /// Raw offer text
        offer: String,
    },

    /// An offer declared on a row other than the one it requires.
    #[error("Offer for {required} specified in wrong SKU entry {sku}")]
    ForeignOffer {
        /// SKU of the declaring row
        sku: String,
        /// SKU the offer requires
        required: String,
    },

    /// An offer refers to a SKU that is not in the catalog.
    #[error("Offer declared by {sku} refers to unknown SKU {referenced}")]
    UnknownProduct {
        /// SKU of the declaring row
        sku: String,
        /// SKU that could not be found
        referenced: String,
    },

    /// An offer with a zero threshold, quantity or price.
    #[error("Invalid offer for {sku}: {reason}")]
    InvalidOffer {
        /// SKU of the declaring row
        sku: String,
        /// What was wrong with it
        reason: &'static str,
    },

    /// IO error reading a catalog file
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Offer grammar failed to compile.
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// Immutable product catalog with its promotion rules.
///
/// Rule lists are sorted by descending threshold when the catalog is built. Product keys
/// are allocated in declaration order, so comparing keys compares declaration position.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: SlotMap<ProductKey, Product>,
    skus: FxHashMap<Sku, ProductKey>,
    multi_buys: SecondaryMap<ProductKey, SmallVec<[MultiBuy; 2]>>,
    freebies: SecondaryMap<ProductKey, SmallVec<[Freebie; 2]>>,
    group_buys: SecondaryMap<ProductKey, SmallVec<[GroupBuy; 1]>>,
}

impl Catalog {
    /// Start building a catalog.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::new()
    }

    /// Look up a product key by SKU.
    pub fn key(&self, sku: &str) -> Option<ProductKey> {
        self.skus.get(sku).copied()
    }

    /// Get a product by key.
    pub fn product(&self, key: ProductKey) -> Option<&Product> {
        self.products.get(key)
    }

    /// Base price of a product.
    pub fn price(&self, key: ProductKey) -> Option<Price> {
        self.products.get(key).map(|product| product.price)
    }

    /// Iterate over products in declaration order.
    pub fn products(&self) -> impl Iterator<Item = (ProductKey, &Product)> {
        self.products.iter()
    }

    /// Multi-buy rules for a product, largest threshold first.
    pub fn multi_buys(&self, key: ProductKey) -> &[MultiBuy] {
        self.multi_buys.get(key).map_or(&[], SmallVec::as_slice)
    }

    /// Freebie rules triggered by a product, largest threshold first.
    pub fn freebies(&self, key: ProductKey) -> &[Freebie] {
        self.freebies.get(key).map_or(&[], SmallVec::as_slice)
    }

    /// Group-buy rules declared on a product.
    pub fn group_buys(&self, key: ProductKey) -> &[GroupBuy] {
        self.group_buys.get(key).map_or(&[], SmallVec::as_slice)
    }

    /// Products that trigger freebies, with their rules.
    pub fn freebie_triggers(&self) -> impl Iterator<Item = (ProductKey, &[Freebie])> {
        self.freebies
            .iter()
            .map(|(key, rules)| (key, rules.as_slice()))
    }

    /// Products that declare group-buys, with their rules.
    pub fn group_buy_owners(&self) -> impl Iterator<Item = (ProductKey, &[GroupBuy])> {
        self.group_buys
            .iter()
            .map(|(key, rules)| (key, rules.as_slice()))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
