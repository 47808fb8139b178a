//! Terminal front-end over the aggregation core

pub mod country;
pub mod recent;
pub mod setup;
pub mod summary;
pub mod ui;

use crate::core::{AggregationEngine, CountryDirectory, EntryCount, LedgerSource, RateProvider};
use anyhow::{Context, Result};
use tracing::debug;

/// Fetches both sheets, then the rates they need, and builds the engine.
pub async fn prepare_engine<'a>(
    directory: &'a CountryDirectory,
    source: &(dyn LedgerSource + Send + Sync),
    rate_provider: &(dyn RateProvider + Send + Sync),
    home_currency: &str,
    entry_count: EntryCount,
) -> Result<AggregationEngine<'a>> {
    let pb = ui::new_spinner("Fetching spending...");
    let rows = futures::try_join!(source.fetch_daily(), source.fetch_one_off());
    pb.finish_and_clear();
    let (daily, one_off) = rows.context("Failed to fetch spending rows")?;
    debug!(daily = daily.len(), one_off = one_off.len(), "Fetched rows");

    let pb = ui::new_spinner("Fetching exchange rates...");
    let engine =
        AggregationEngine::build(directory, rate_provider, home_currency, daily, one_off).await;
    pb.finish_and_clear();

    Ok(engine?.with_entry_count(entry_count))
}
