mod amount;
pub mod exchange_rate;
pub mod sheetson;

pub use exchange_rate::ExchangeRateApiProvider;
pub use sheetson::SheetsonSource;

use anyhow::{Context, Result};

/// Client shared by every request a provider makes.
pub(crate) fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("tripspend/1.0")
        .build()
        .context("Failed to build HTTP client")
}
