//! Fixed-width Catalog Tables
//!
//! ```text
//! +------+-------+------------------------+
//! | Item | Price | Special offers         |
//! +------+-------+------------------------+
//! | A    | 50    | 3A for 130, 5A for 200 |
//! | B    | 30    | 2B for 45              |
//! +------+-------+------------------------+
//! ```
//!
//! Border rows and blank lines are ignored, as is an optional `Item | Price` header.

use std::{fs, path::Path};

use tracing::debug;

use crate::catalog::{Catalog, CatalogBuilder, CatalogError, offers::OfferParser};

/// Parse a catalog from fixed-width table text.
///
/// # Errors
///
/// Returns a [`CatalogError`] for malformed rows, duplicate SKUs, bad prices, malformed
/// or misplaced offers, or offers referring to unknown SKUs.
pub fn parse(source: &str) -> Result<Catalog, CatalogError> {
    let parser = OfferParser::new()?;
    let mut builder = CatalogBuilder::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();

        if line.is_empty() || line.starts_with('+') {
            continue;
        }

        let malformed = || CatalogError::MalformedRow {
            line: idx + 1,
            content: line.to_string(),
        };

        let inner = line
            .strip_prefix('|')
            .and_then(|rest| rest.strip_suffix('|'))
            .ok_or_else(malformed)?;

        let cells: Vec<&str> = inner.split('|').map(str::trim).collect();

        let [sku, price, offers] = cells.as_slice() else {
            return Err(malformed());
        };

        if is_header(sku, price) {
            continue;
        }

        let price: u64 = price.parse().map_err(|_err| CatalogError::InvalidPrice {
            sku: (*sku).to_string(),
            value: (*price).to_string(),
        })?;

        builder.add_product(sku, price)?;

        for offer in parser.parse_cell(sku, offers)? {
            builder.add_offer(sku, offer)?;
        }
    }

    let catalog = builder.build()?;

    debug!(products = catalog.len(), "parsed catalog table");

    Ok(catalog)
}

/// Read and parse a catalog table from a file.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as [`parse`].
pub fn load(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let contents = fs::read_to_string(path.as_ref())?;

    parse(&contents)
}

fn is_header(sku: &str, price: &str) -> bool {
    sku.eq_ignore_ascii_case("item") && price.eq_ignore_ascii_case("price")
}
