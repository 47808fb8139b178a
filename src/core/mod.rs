//! Currency-normalized aggregation of travel spending

pub mod analytics;
pub mod config;
pub mod country;
pub mod currency;
pub mod error;
pub mod ledger;
pub mod log;

// Re-export main types for cleaner imports
pub use analytics::{AggregationEngine, CountryAverage, EntryCount, SummaryResult};
pub use country::{CountryDirectory, CountryField, CountryRecord};
pub use currency::{RateProvider, RateTable};
pub use error::LedgerError;
pub use ledger::{DailyEntry, LedgerSource, OneOffEntry};
