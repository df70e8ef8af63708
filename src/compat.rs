//! Sentinel Compatibility
//!
//! Callers written against the integer-only interface expect `-1` for any rejected order
//! instead of an error value. That interface only ever accepted a string of
//! single-character SKUs, so every other input shape, arrays included, is rejected here.

use serde_json::Value;
use tracing::debug;

use crate::{
    input,
    pricing::{Checkout, CheckoutError},
};

/// Returned for any rejected order.
pub const SENTINEL: i64 = -1;

/// Price a string of single-character SKUs, returning [`SENTINEL`] on failure.
pub fn checkout(engine: &Checkout<'_>, skus: &str) -> i64 {
    to_sentinel(engine.price_str(skus))
}

/// Price a JSON value, returning [`SENTINEL`] on failure or for anything but a string.
pub fn checkout_value(engine: &Checkout<'_>, value: &Value) -> i64 {
    to_sentinel(input::sku_string(value).and_then(|skus| engine.price_str(skus)))
}

/// Price raw JSON text, as [`checkout_value`].
pub fn checkout_json(engine: &Checkout<'_>, text: &str) -> i64 {
    to_sentinel(input::parse(text).and_then(|value| {
        let skus = input::sku_string(&value)?;

        engine.price_str(skus)
    }))
}

/// Collapse a pricing result into the sentinel convention.
pub fn to_sentinel(result: Result<u64, CheckoutError>) -> i64 {
    match result.map(i64::try_from) {
        Ok(Ok(total)) => total,
        Ok(Err(_)) => {
            debug!("total does not fit the sentinel interface");
            SENTINEL
        }
        Err(err) => {
            debug!(%err, "order rejected");
            SENTINEL
        }
    }
}
