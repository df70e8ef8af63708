//! Till
//!
//! Till prices shopping orders against a catalog of base prices and promotions: tiered
//! multi-buys, buy-N-get-M-free offers and group-buys pooled across several products.
//!
//! ```
//! use till::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = reference::full()?;
//! let checkout = Checkout::new(&catalog);
//!
//! assert_eq!(checkout.price_str("EEEBB")?, 150);
//! assert_eq!(checkout.price(["F", "F", "F"])?, 20);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod compat;
pub mod input;
pub mod order;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod products;
pub mod promotions;
pub mod receipt;
