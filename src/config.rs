//! Command-line configuration

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Catalog source format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CatalogFormat {
    /// Fixed-width `| SKU | price | offers |` table.
    Table,

    /// YAML product list.
    Yaml,
}

impl CatalogFormat {
    /// Guess the format from a file extension; anything but `.yml`/`.yaml` is a table.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                CatalogFormat::Yaml
            }
            _ => CatalogFormat::Table,
        }
    }
}

/// Till configuration
#[derive(Debug, Parser)]
#[command(name = "till", about = "Price an order against a promotion catalog", long_about = None)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "independent boolean output toggles from CLI/env."
)]
pub struct Config {
    /// Order to price: a string of single-character SKUs, or JSON with `--json`
    pub order: String,

    /// Catalog file; the built-in A-Z catalog is used when omitted
    #[arg(short, long, env = "TILL_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Catalog format (inferred from the file extension when omitted)
    #[arg(long, env = "TILL_CATALOG_FORMAT", value_enum)]
    pub catalog_format: Option<CatalogFormat>,

    /// Treat the order as JSON: a string or an array of SKU strings
    #[arg(long)]
    pub json: bool,

    /// Print the full receipt instead of just the total
    #[arg(short, long)]
    pub receipt: bool,

    /// Print -1 instead of failing on rejected orders
    #[arg(long)]
    pub sentinel: bool,

    /// Use the minimal four-product catalog instead of the full one
    #[arg(long, conflicts_with = "catalog")]
    pub minimal: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Format of the configured catalog file, if any.
    pub fn resolved_catalog_format(&self) -> Option<CatalogFormat> {
        self.catalog.as_deref().map(|path| {
            self.catalog_format
                .unwrap_or_else(|| CatalogFormat::from_path(path))
        })
    }
}
