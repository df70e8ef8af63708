//! YAML Catalog Fixtures
//!
//! ```yaml
//! products:
//!   - sku: A
//!     price: 50
//!     offers:
//!       - 3A for 130
//!       - 5A for 200
//!   - sku: C
//!     price: 20
//! ```
//!
//! Offers use the same text as catalog tables and go through the same validation.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::debug;

use crate::catalog::{Catalog, CatalogBuilder, CatalogError, offers::OfferParser};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products in declaration order
    pub products: Vec<ProductFixture>,
}

/// Product fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product SKU
    pub sku: String,

    /// Base price in minor units
    pub price: u64,

    /// Offer descriptions declared on this product
    #[serde(default)]
    pub offers: Vec<String>,
}

impl TryFrom<CatalogFixture> for Catalog {
    type Error = CatalogError;

    fn try_from(fixture: CatalogFixture) -> Result<Self, Self::Error> {
        let parser = OfferParser::new()?;
        let mut builder = CatalogBuilder::new();

        for product in &fixture.products {
            builder.add_product(&product.sku, product.price)?;

            for text in &product.offers {
                for offer in parser.parse_cell(&product.sku, text)? {
                    builder.add_offer(&product.sku, offer)?;
                }
            }
        }

        builder.build()
    }
}

/// Parse a catalog from YAML text.
///
/// # Errors
///
/// Returns [`CatalogError::Yaml`] for invalid YAML, otherwise the same errors as table
/// loading.
pub fn parse(source: &str) -> Result<Catalog, CatalogError> {
    let fixture: CatalogFixture = serde_norway::from_str(source)?;
    let catalog = Catalog::try_from(fixture)?;

    debug!(products = catalog.len(), "parsed catalog fixture");

    Ok(catalog)
}

/// Read and parse a YAML catalog from a file.
///
/// # Errors
///
/// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as [`parse`].
pub fn load(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let contents = fs::read_to_string(path.as_ref())?;

    parse(&contents)
}
