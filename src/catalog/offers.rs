//! Offer Text
//!
//! Parses the human-written offer descriptions found in catalog sources:
//!
//! - multi-buy: `3A for 130`
//! - freebie: `2E get one B free`
//! - group-buy: `buy any 3 of (S,T,X,Y,Z) for 45`
//!
//! Several offers may share one cell, separated by commas. Commas inside the parentheses
//! of a group-buy belong to that offer.

use regex::{Captures, Regex};
use smallvec::SmallVec;

use crate::{catalog::CatalogError, prices::Price, products::Sku};

/// Identifier shape accepted by [`Sku::is_well_formed`].
const SKU_PATTERN: &str = r"[A-Z][A-Z0-9_]*";

/// An offer as written in a catalog source, before SKUs are resolved to products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offer {
    /// Buy `quantity` of `sku` for `price`.
    MultiBuy {
        /// Required SKU
        sku: Sku,
        /// Units per set
        quantity: u64,
        /// Flat price of one set
        price: Price,
    },

    /// Buy `quantity` of `sku`, get `free_quantity` of `free_sku` free.
    Freebie {
        /// Required SKU
        sku: Sku,
        /// Units that must be bought
        quantity: u64,
        /// SKU given away
        free_sku: Sku,
        /// Units given away per set
        free_quantity: u64,
    },

    /// Any `quantity` of the listed SKUs for `price`.
    GroupBuy {
        /// Units per set, pooled across `skus`
        quantity: u64,
        /// Accepted SKUs
        skus: SmallVec<[Sku; 5]>,
        /// Flat price of one set
        price: Price,
    },
}

impl Offer {
    /// The SKU an offer is keyed on: the bought SKU, or the first accepted group-buy SKU.
    pub fn required_sku(&self) -> &str {
        match self {
            Offer::MultiBuy { sku, .. } | Offer::Freebie { sku, .. } => sku.as_str(),
            Offer::GroupBuy { skus, .. } => skus.first().map_or("", Sku::as_str),
        }
    }

    /// Whether the row for `sku` may declare this offer.
    pub fn is_declarable_by(&self, sku: &str) -> bool {
        match self {
            Offer::MultiBuy { sku: required, .. } | Offer::Freebie { sku: required, .. } => {
                required.as_str() == sku
            }
            Offer::GroupBuy { skus, .. } => skus.iter().any(|accepted| accepted.as_str() == sku),
        }
    }
}

/// Compiled offer grammar.
#[derive(Debug)]
pub struct OfferParser {
    multi_buy: Regex,
    freebie: Regex,
    group_buy: Regex,
}

impl OfferParser {
    /// Compile the offer grammar.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Pattern`] if a pattern fails to compile.
    pub fn new() -> Result<Self, CatalogError> {
        Ok(Self {
            multi_buy: Regex::new(&format!(
                r"^(?P<quantity>\d+)\s*(?P<sku>{SKU_PATTERN})\s+for\s+(?P<price>\d+)$"
            ))?,
            freebie: Regex::new(&format!(
                r"^(?P<quantity>\d+)\s*(?P<sku>{SKU_PATTERN})\s+get\s+(?P<free_quantity>one|two|three|\d+)\s*(?P<free_sku>{SKU_PATTERN})\s+free$"
            ))?,
            group_buy: Regex::new(
                r"^buy\s+any\s+(?P<quantity>\d+)\s+of\s+\((?P<skus>[^()]*)\)\s+for\s+(?P<price>\d+)$",
            )?,
        })
    }

    /// Parse every offer in a cell declared on the row for `sku`.
    ///
    /// An empty cell yields no offers.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedOffer`] if any offer does not match the grammar.
    pub fn parse_cell(&self, sku: &str, cell: &str) -> Result<Vec<Offer>, CatalogError> {
        split_offers(cell)
            .map(|offer| self.parse(sku, offer))
            .collect()
    }

    /// Parse a single offer declared on the row for `sku`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::MalformedOffer`] if the text does not match the grammar.
    pub fn parse(&self, sku: &str, text: &str) -> Result<Offer, CatalogError> {
        let text = text.trim();
        let malformed = || CatalogError::MalformedOffer {
            sku: sku.to_string(),
            offer: text.to_string(),
        };

        if let Some(caps) = self.freebie.captures(text) {
            return Ok(Offer::Freebie {
                sku: Sku::new(capture(&caps, "sku").ok_or_else(malformed)?),
                quantity: number(&caps, "quantity").ok_or_else(malformed)?,
                free_sku: Sku::new(capture(&caps, "free_sku").ok_or_else(malformed)?),
                free_quantity: capture(&caps, "free_quantity")
                    .and_then(free_quantity)
                    .ok_or_else(malformed)?,
            });
        }

        if let Some(caps) = self.multi_buy.captures(text) {
            return Ok(Offer::MultiBuy {
                sku: Sku::new(capture(&caps, "sku").ok_or_else(malformed)?),
                quantity: number(&caps, "quantity").ok_or_else(malformed)?,
                price: Price::new(number(&caps, "price").ok_or_else(malformed)?),
            });
        }

        if let Some(caps) = self.group_buy.captures(text) {
            let skus = capture(&caps, "skus")
                .ok_or_else(malformed)?
                .split(',')
                .map(str::trim)
                .map(|token| {
                    if Sku::is_well_formed(token) {
                        Ok(Sku::new(token))
                    } else {
                        Err(malformed())
                    }
                })
                .collect::<Result<SmallVec<[Sku; 5]>, CatalogError>>()?;

            return Ok(Offer::GroupBuy {
                quantity: number(&caps, "quantity").ok_or_else(malformed)?,
                skus,
                price: Price::new(number(&caps, "price").ok_or_else(malformed)?),
            });
        }

        Err(malformed())
    }
}

/// Split a cell on commas that are not inside parentheses, dropping blank pieces.
fn split_offers(cell: &str) -> impl Iterator<Item = &str> {
    let mut depth = 0_usize;

    cell.split(move |c: char| match c {
        '(' => {
            depth += 1;
            false
        }
        ')' => {
            depth = depth.saturating_sub(1);
            false
        }
        ',' => depth == 0,
        _ => false,
    })
    .map(str::trim)
    .filter(|offer| !offer.is_empty())
}

fn capture<'t>(caps: &Captures<'t>, name: &str) -> Option<&'t str> {
    caps.name(name).map(|m| m.as_str())
}

fn number(caps: &Captures<'_>, name: &str) -> Option<u64> {
    capture(caps, name)?.parse().ok()
}

fn free_quantity(text: &str) -> Option<u64> {
    match text {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        digits => digits.parse().ok(),
    }
}
