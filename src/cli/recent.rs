use super::ui;
use crate::core::{CountryDirectory, EntryCount, LedgerSource, RateProvider};
use anyhow::Result;
use chrono::NaiveDate;

pub const NO_RECENT_SPENDING: &str = "No spending logged today or yesterday";

pub async fn run(
    directory: &CountryDirectory,
    source: &(dyn LedgerSource + Send + Sync),
    rate_provider: &(dyn RateProvider + Send + Sync),
    home_currency: &str,
    today: NaiveDate,
) -> Result<()> {
    let engine = super::prepare_engine(
        directory,
        source,
        rate_provider,
        home_currency,
        EntryCount::default(),
    )
    .await?;

    match engine.recent_spending(today)? {
        Some(message) => println!("{message}"),
        None => println!("{}", ui::style_text(NO_RECENT_SPENDING, ui::StyleType::Subtle)),
    }
    Ok(())
}
