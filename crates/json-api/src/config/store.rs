//! Store Config

use clap::Args;

/// Storefront settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// ISO 4217 code used to format display prices
    #[arg(long, env = "STORE_CURRENCY", default_value = "USD")]
    pub currency: String,
}
