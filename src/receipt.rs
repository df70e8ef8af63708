//! Receipt

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::Catalog, products::ProductKey, promotions::applications::PromotionApplication,
};

/// Errors that can occur when rendering a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// Error finding a product in the catalog.
    #[error("Missing product")]
    MissingProduct(ProductKey),

    /// IO error
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Units of one product charged at base price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullPriceLine {
    /// Product charged
    pub product: ProductKey,

    /// Units charged at base price
    pub quantity: u64,

    /// Amount charged
    pub price: u64,
}

/// Final receipt for a priced order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Every unit at base price
    subtotal: u64,

    /// Amount payable after promotions
    total: u64,

    /// Promotion applications in the order they were made
    applications: Vec<PromotionApplication>,

    /// Units left over after all promotions
    full_price: Vec<FullPriceLine>,
}

impl Receipt {
    /// Create a new receipt with the given details.
    pub fn new(
        subtotal: u64,
        total: u64,
        applications: Vec<PromotionApplication>,
        full_price: Vec<FullPriceLine>,
    ) -> Self {
        Self {
            subtotal,
            total,
            applications,
            full_price,
        }
    }

    /// Total cost before any promotion applications
    pub fn subtotal(&self) -> u64 {
        self.subtotal
    }

    /// Total amount paid for all items
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Amount saved by promotions.
    ///
    /// Zero when promotions made the order more expensive than base price.
    pub fn savings(&self) -> u64 {
        self.subtotal.saturating_sub(self.total)
    }

    /// Promotion applications.
    pub fn applications(&self) -> &[PromotionApplication] {
        &self.applications
    }

    /// Units charged at base price.
    pub fn full_price_lines(&self) -> &[FullPriceLine] {
        &self.full_price
    }

    /// Render the receipt as a table followed by a summary.
    ///
    /// # Errors
    ///
    /// - [`ReceiptError::MissingProduct`]: a line refers to a product not in `catalog`.
    /// - [`ReceiptError::Io`]: writing to `out` failed.
    pub fn write_to(&self, mut out: impl io::Write, catalog: &Catalog) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record(["Item", "Qty", "Base Price", "Charged", "Savings", "Promotion"]);

        for app in &self.applications {
            let items = app
                .units
                .iter()
                .map(|(key, units)| Ok(format!("{} x{units}", sku(catalog, *key)?)))
                .collect::<Result<Vec<_>, ReceiptError>>()?;

            builder.push_record([
                if items.is_empty() {
                    "-".to_string()
                } else {
                    items.join("\n")
                },
                app.unit_count().to_string(),
                app.original_price.to_string(),
                app.final_price.to_string(),
                app.savings().to_string(),
                format!("{} x{} ({})", app.kind, app.sets, sku(catalog, app.product)?),
            ]);
        }

        for line in &self.full_price {
            builder.push_record([
                sku(catalog, line.product)?.to_string(),
                line.quantity.to_string(),
                line.price.to_string(),
                line.price.to_string(),
                "0".to_string(),
                String::new(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..5), Alignment::right());
        table.modify(Rows::first(), Alignment::center());

        writeln!(out, "{table}")?;
        writeln!(out, " Subtotal: {:>10}", self.subtotal)?;
        writeln!(out, " Total:    {:>10}", self.total)?;
        writeln!(out, " Savings:  {:>10}", self.savings())?;

        Ok(())
    }
}

fn sku(catalog: &Catalog, key: ProductKey) -> Result<&str, ReceiptError> {
    catalog
        .product(key)
        .map(|product| product.sku.as_str())
        .ok_or(ReceiptError::MissingProduct(key))
}
