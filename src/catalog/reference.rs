//! Reference Catalogs

use crate::catalog::{Catalog, CatalogError, table};

/// Four products, one multi-buy tier each on A and B.
pub const MINIMAL: &str = "
+------+-------+----------------+
| Item | Price | Special offers |
+------+-------+----------------+
| A    | 50    | 3A for 130     |
| B    | 30    | 2B for 45      |
| C    | 20    |                |
| D    | 15    |                |
+------+-------+----------------+
";

/// The full A to Z price list with every offer type.
pub const FULL: &str = "
+------+-------+---------------------------------+
| Item | Price | Special offers                  |
+------+-------+---------------------------------+
| A    | 50    | 3A for 130, 5A for 200          |
| B    | 30    | 2B for 45                       |
| C    | 20    |                                 |
| D    | 15    |                                 |
| E    | 40    | 2E get one B free               |
| F    | 10    | 2F get one F free               |
| G    | 20    |                                 |
| H    | 10    | 5H for 45, 10H for 80           |
| I    | 35    |                                 |
| J    | 60    |                                 |
| K    | 80    | 2K for 150                      |
| L    | 90    |                                 |
| M    | 15    |                                 |
| N    | 40    | 3N get one M free               |
| O    | 10    |                                 |
| P    | 50    | 5P for 200                      |
| Q    | 30    | 3Q for 80                       |
| R    | 50    | 3R get one Q free               |
| S    | 30    | buy any 3 of (S,T,X,Y,Z) for 45 |
| T    | 20    |                                 |
| U    | 40    | 3U get one U free               |
| V    | 50    | 2V for 90, 3V for 130           |
| W    | 20    |                                 |
| X    | 90    |                                 |
| Y    | 10    |                                 |
| Z    | 50    |                                 |
+------+-------+---------------------------------+
";

/// Parse the [`MINIMAL`] catalog.
///
/// # Errors
///
/// Only if the embedded table is broken.
pub fn minimal() -> Result<Catalog, CatalogError> {
    table::parse(MINIMAL)
}

/// Parse the [`FULL`] catalog.
///
/// # Errors
///
/// Only if the embedded table is broken.
pub fn full() -> Result<Catalog, CatalogError> {
    table::parse(FULL)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn minimal_has_four_products() -> TestResult {
        assert_eq!(minimal()?.len(), 4);

        Ok(())
    }

    #[test]
    fn full_has_every_letter_and_rule_kind() -> TestResult {
        let catalog = full()?;

        assert_eq!(catalog.len(), 26);
        assert_eq!(catalog.freebie_triggers().count(), 5);
        assert_eq!(catalog.group_buy_owners().count(), 1);

        Ok(())
    }
}
