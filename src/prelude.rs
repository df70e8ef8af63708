//! Till prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogBuilder, CatalogError, fixture, offers::Offer, reference, table},
    compat::{SENTINEL, checkout, checkout_json, checkout_value},
    order::Order,
    prices::Price,
    pricing::{Checkout, CheckoutError},
    products::{Product, ProductKey, Sku},
    receipt::{FullPriceLine, Receipt, ReceiptError},
};

pub use crate::promotions::prelude::*;
