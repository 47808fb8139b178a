//! Expense rows and the source that supplies them

use crate::core::error::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A dated, recurring daily-spend entry in local currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyEntry {
    pub id: i64,
    pub country: String,
    pub date: NaiveDate,
    pub total: Decimal,
}

/// An undated one-off purchase in local currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneOffEntry {
    pub country: String,
    pub total: Decimal,
}

/// Supplies already-validated rows. Daily entries come back in the order
/// they were logged; the last one is the most recent.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    async fn fetch_daily(&self) -> Result<Vec<DailyEntry>>;
    async fn fetch_one_off(&self) -> Result<Vec<OneOffEntry>>;
}
