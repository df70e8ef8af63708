//! Reference orders priced end to end against the built-in catalogs.
//!
//! The minimal catalog only has `3A for 130`, so seven A cost 2x130 + 50 = 310. The full
//! catalog adds `5A for 200`, which is taken first: 200 + 2x50 = 300.

use serde_json::json;
use testresult::TestResult;

use till::{compat, prelude::*};

#[test]
fn minimal_catalog_orders() -> TestResult {
    let catalog = reference::minimal()?;
    let checkout = Checkout::new(&catalog);

    assert_eq!(checkout.price_str("ABCD")?, 115);
    assert_eq!(checkout.price_str("")?, 0);
    assert_eq!(checkout.price_str("AAAAAAA")?, 310);
    assert_eq!(checkout.price_str("BBBB")?, 90);
    assert_eq!(checkout.price_str("DAABCAB")?, 210);
    assert_eq!(checkout.price_str("AABCCDD")?, 200);
    assert_eq!(checkout.price_str("ACBDCDADD")?, 230);

    Ok(())
}

#[test]
fn full_catalog_orders() -> TestResult {
    let catalog = reference::full()?;
    let checkout = Checkout::new(&catalog);

    assert_eq!(checkout.price_str("ABCD")?, 115);
    assert_eq!(checkout.price_str("AAAAAAA")?, 300);
    assert_eq!(checkout.price_str("EEAA")?, 180);
    assert_eq!(checkout.price_str("EEEBB")?, 150);
    assert_eq!(checkout.price_str("EEBB")?, 110);
    assert_eq!(checkout.price_str("FFF")?, 20);
    assert_eq!(checkout.price_str("FFFF")?, 30);
    assert_eq!(checkout.price_str("UUUU")?, 120);
    assert_eq!(checkout.price_str("NNNM")?, 120);
    assert_eq!(checkout.price_str("RRRQQQ")?, 150 + 60);
    assert_eq!(checkout.price_str("VVVVV")?, 130 + 90);
    assert_eq!(checkout.price_str("KK")?, 150);

    Ok(())
}

#[test]
fn full_catalog_group_buys() -> TestResult {
    let catalog = reference::full()?;
    let checkout = Checkout::new(&catalog);

    // X, Z and S are taken into the set; T stays at 20.
    assert_eq!(checkout.price_str("STXZ")?, 45 + 20);
    assert_eq!(checkout.price_str("SSSZ")?, 45 + 30);
    assert_eq!(checkout.price_str("XXXXXX")?, 90);

    Ok(())
}

#[test]
fn rejected_orders() -> TestResult {
    let catalog = reference::minimal()?;
    let checkout = Checkout::new(&catalog);

    assert_eq!(
        checkout.price_str("ABF"),
        Err(CheckoutError::UnknownItem("F".to_string()))
    );
    assert!(matches!(
        checkout.price_input(&json!([["A"], "B"])),
        Err(CheckoutError::InvalidInput(_))
    ));

    assert_eq!(compat::checkout(&checkout, "ABF"), SENTINEL);
    assert_eq!(compat::checkout(&checkout, "AAB"), 130);
    assert_eq!(
        compat::checkout_value(&checkout, &json!({"A": 1})),
        SENTINEL
    );
    assert_eq!(
        compat::checkout_value(&checkout, &json!(["A", "B"])),
        SENTINEL
    );
    assert_eq!(checkout.price_input(&json!(["A", "B"]))?, 80);

    Ok(())
}

#[test]
fn receipt_agrees_with_total() -> TestResult {
    let catalog = reference::full()?;
    let checkout = Checkout::new(&catalog);

    let skus: Vec<String> = "AAAAAAAEEBBFFFSTXZHHHHHHHHHHH"
        .chars()
        .map(String::from)
        .collect();

    let receipt = checkout.receipt(&skus)?;

    assert_eq!(receipt.total(), checkout.price(&skus)?);
    assert_eq!(
        receipt.savings(),
        receipt.subtotal().saturating_sub(receipt.total())
    );

    let charged: u64 = receipt
        .applications()
        .iter()
        .map(|app| app.final_price)
        .chain(receipt.full_price_lines().iter().map(|line| line.price))
        .sum();

    assert_eq!(charged, receipt.total());

    Ok(())
}
