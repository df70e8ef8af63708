//! Till CLI

use std::io::{self, Write};

use anyhow::{Context, Result};
use till::{
    catalog::{Catalog, fixture, reference, table},
    compat, input,
    pricing::Checkout,
};
use tracing::{error, info};

use crate::config::{CatalogFormat, Config};

mod config;
mod observability;

/// Price the order given on the command line and print the total or a receipt.
pub fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|err| err.exit());

    observability::init_subscriber(&config)?;

    let catalog = load_catalog(&config).inspect_err(|err| error!(%err, "catalog failed to load"))?;

    info!(products = catalog.len(), "catalog loaded");

    let checkout = Checkout::new(&catalog);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if config.sentinel {
        let total = if config.json {
            compat::checkout_json(&checkout, &config.order)
        } else {
            compat::checkout(&checkout, &config.order)
        };

        writeln!(out, "{total}")?;

        return Ok(());
    }

    let skus = if config.json {
        input::skus_from_json(&config.order)?
    } else {
        config.order.chars().map(String::from).collect()
    };

    let receipt = checkout.receipt(skus)?;

    if config.receipt {
        receipt.write_to(&mut out, &catalog)?;
    } else {
        writeln!(out, "{}", receipt.total())?;
    }

    Ok(())
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    let Some(path) = config.catalog.as_deref() else {
        let catalog = if config.minimal {
            reference::minimal()
        } else {
            reference::full()
        };

        return catalog.context("built-in catalog is invalid");
    };

    let catalog = match config.resolved_catalog_format() {
        Some(CatalogFormat::Yaml) => fixture::load(path),
        Some(CatalogFormat::Table) | None => table::load(path),
    };

    catalog.with_context(|| format!("failed to load catalog from {}", path.display()))
}
