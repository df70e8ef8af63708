//! Loosely typed order input
//!
//! Orders arriving as JSON are either a string, where every character is one SKU, or an
//! array of SKU strings. Anything else is rejected before any pricing happens.

use serde_json::Value;

use crate::{pricing::CheckoutError, products::Sku};

/// Extract identifiers from a JSON value.
///
/// # Errors
///
/// Returns [`CheckoutError::InvalidInput`] if the value is neither a string nor an array of
/// well-formed identifier strings.
pub fn skus(value: &Value) -> Result<Vec<String>, CheckoutError> {
    match value {
        Value::String(skus) => Ok(skus.chars().map(String::from).collect()),
        Value::Array(elements) => elements
            .iter()
            .enumerate()
            .map(|(idx, element)| match element {
                Value::String(sku) if Sku::is_well_formed(sku) => Ok(sku.clone()),
                Value::String(sku) => Err(CheckoutError::InvalidInput(format!(
                    "element {idx} is not an item identifier: {sku:?}"
                ))),
                other => Err(CheckoutError::InvalidInput(format!(
                    "element {idx} is {}, expected a string",
                    kind(other)
                ))),
            })
            .collect(),
        other => Err(CheckoutError::InvalidInput(format!(
            "order is {}, expected a string or an array of strings",
            kind(other)
        ))),
    }
}

/// The order string of a JSON value. Only strings are accepted, arrays included.
///
/// # Errors
///
/// Returns [`CheckoutError::InvalidInput`] for any value that is not a string.
pub fn sku_string(value: &Value) -> Result<&str, CheckoutError> {
    value.as_str().ok_or_else(|| {
        CheckoutError::InvalidInput(format!("order is {}, expected a string", kind(value)))
    })
}

/// Parse raw JSON text.
///
/// # Errors
///
/// Returns [`CheckoutError::InvalidInput`] if the text is not JSON.
pub fn parse(text: &str) -> Result<Value, CheckoutError> {
    serde_json::from_str(text)
        .map_err(|err| CheckoutError::InvalidInput(format!("not valid JSON: {err}")))
}

/// Parse raw JSON text and extract identifiers.
///
/// # Errors
///
/// Returns [`CheckoutError::InvalidInput`] if the text is not JSON or has the wrong shape.
pub fn skus_from_json(text: &str) -> Result<Vec<String>, CheckoutError> {
    skus(&parse(text)?)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
