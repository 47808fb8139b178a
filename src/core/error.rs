//! Error taxonomy for the aggregation core

use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Every failure aborts the whole aggregation; there is no partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Currency rate request failed: {0}")]
    RateFetch(String),

    #[error("Missing currency rates for: {}", .0.join(", "))]
    MissingCurrency(Vec<String>),

    #[error("Country code {0} not found in country data")]
    CountryNotFound(String),

    #[error("{0} not found in the exchange rate data")]
    UnknownCurrency(String),

    #[error("Country code {0} appears more than once in country data")]
    DuplicateCountry(String),

    #[error("Invalid exchange rate {rate} for {currency}")]
    InvalidRate { currency: String, rate: Decimal },

    #[error("No daily entries to summarise")]
    NoDailyEntries,

    #[error("Invalid number of entries: {0}")]
    InvalidEntryCount(i64),

    #[error("Amount overflow while computing {0}")]
    AmountOverflow(String),

    #[error("Row request failed: {0}")]
    RowFetch(String),

    #[error("Invalid row: {0}")]
    InvalidRow(String),
}
