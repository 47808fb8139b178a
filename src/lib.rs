pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::CountryDirectory;
use anyhow::Result;
use chrono::Local;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Summary { json: bool },
    Recent,
    Country { code: String },
}

fn load_directory(config: &AppConfig) -> Result<CountryDirectory> {
    match &config.countries_path {
        Some(path) => CountryDirectory::load_from_path(path),
        None => CountryDirectory::bundled(),
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Trip spending tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!(
        home_currency = %config.home_currency,
        entry_count = ?config.entry_count,
        "Loaded config"
    );

    let directory = load_directory(&config)?;

    let rates = &config.providers.exchange_rate;
    let rate_provider = providers::ExchangeRateApiProvider::new(&rates.base_url, &rates.api_key)?;

    let sheets = &config.providers.sheetson;
    let source =
        providers::SheetsonSource::new(&sheets.base_url, &sheets.spreadsheet_id, &sheets.api_key)?
            .with_sheets(&sheets.daily_sheet, &sheets.one_off_sheet)
            .with_row_limit(sheets.row_limit);

    let today = Local::now().date_naive();

    match command {
        AppCommand::Summary { json } => {
            cli::summary::run(
                &directory,
                &source,
                &rate_provider,
                &config.home_currency,
                config.entry_count,
                today,
                json,
            )
            .await
        }
        AppCommand::Recent => {
            cli::recent::run(
                &directory,
                &source,
                &rate_provider,
                &config.home_currency,
                today,
            )
            .await
        }
        AppCommand::Country { code } => cli::country::run(&directory, &code),
    }
}
