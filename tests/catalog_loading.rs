//! Catalog files on disk, in both table and YAML form.

use std::{fs, path::PathBuf};

use tempfile::TempDir;
use testresult::TestResult;

use till::prelude::*;

fn write(dir: &TempDir, name: &str, contents: &str) -> TestResult<PathBuf> {
    let path = dir.path().join(name);

    fs::write(&path, contents)?;

    Ok(path)
}

#[test]
fn table_file_prices_orders() -> TestResult {
    let dir = TempDir::new()?;
    let path = write(&dir, "catalog.txt", reference::FULL)?;

    let catalog = table::load(&path)?;

    assert_eq!(catalog.len(), 26);
    assert_eq!(Checkout::new(&catalog).price_str("EEEBB")?, 150);

    Ok(())
}

#[test]
fn yaml_file_matches_equivalent_table() -> TestResult {
    let dir = TempDir::new()?;
    let path = write(
        &dir,
        "catalog.yml",
        "
products:
  - sku: A
    price: 50
    offers:
      - 3A for 130
  - sku: B
    price: 30
    offers:
      - 2B for 45
  - sku: C
    price: 20
  - sku: D
    price: 15
",
    )?;

    let from_yaml = fixture::load(&path)?;
    let from_table = reference::minimal()?;

    for order in ["ABCD", "AAAAAAA", "BBBB", "DAABCAB", ""] {
        assert_eq!(
            Checkout::new(&from_yaml).price_str(order)?,
            Checkout::new(&from_table).price_str(order)?,
            "order {order:?}"
        );
    }

    Ok(())
}

#[test]
fn missing_file_is_an_io_error() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("absent.txt");

    assert!(matches!(table::load(&path), Err(CatalogError::Io(_))));
    assert!(matches!(fixture::load(&path), Err(CatalogError::Io(_))));

    Ok(())
}

#[test]
fn broken_yaml_is_rejected() -> TestResult {
    let dir = TempDir::new()?;
    let path = write(&dir, "catalog.yml", "products: [sku: A")?;

    assert!(matches!(fixture::load(&path), Err(CatalogError::Yaml(_))));

    Ok(())
}

#[test]
fn invalid_tables_are_rejected() {
    assert!(matches!(
        table::parse("| A | 50 | |\n| A | 60 | |"),
        Err(CatalogError::DuplicateSku(sku)) if sku == "A"
    ));
    assert!(matches!(
        table::parse("| A | fifty | |"),
        Err(CatalogError::InvalidPrice { .. })
    ));
    assert!(matches!(
        table::parse("| A | 0 | |"),
        Err(CatalogError::NonPositivePrice(_))
    ));
    assert!(matches!(
        table::parse("| A | 50 | |\n| B | 30 | 3A for 130 |"),
        Err(CatalogError::ForeignOffer { .. })
    ));
    assert!(matches!(
        table::parse("| E | 40 | 2E get one B free |"),
        Err(CatalogError::UnknownProduct { .. })
    ));
    assert!(matches!(
        table::parse("| A | 50 | three for a hundred |"),
        Err(CatalogError::MalformedOffer { .. })
    ));
}

#[test]
fn declared_skus_can_always_be_named_in_offers() -> TestResult {
    let catalog = table::parse(
        "
| APPLE  | 30 | 3 APPLE for 80           |
| PEAR_2 | 40 | 2 PEAR_2 get one APPLE free |
",
    )?;

    assert_eq!(Checkout::new(&catalog).price(["APPLE", "PEAR_2", "PEAR_2"])?, 80);
    assert!(matches!(
        table::parse("| apple | 30 | |"),
        Err(CatalogError::InvalidSku(sku)) if sku == "apple"
    ));

    Ok(())
}

#[test]
fn oversized_offer_numbers_are_rejected() {
    assert!(matches!(
        table::parse("| A | 50 | 1000000000000000000A for 5 |"),
        Err(CatalogError::InvalidOffer { .. })
    ));
    assert!(matches!(
        table::parse("| F | 10 | 18446744073709551615F get 1 F free |"),
        Err(CatalogError::InvalidOffer { .. })
    ));
}

#[test]
fn fixture_offers_follow_table_rules() {
    let source = "
products:
  - sku: A
    price: 50
  - sku: B
    price: 30
    offers:
      - 3A for 130
";

    assert!(matches!(
        fixture::parse(source),
        Err(CatalogError::ForeignOffer { .. })
    ));
}
