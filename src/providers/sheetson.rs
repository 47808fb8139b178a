use super::amount::RawAmount;
use crate::core::error::{LedgerError, Result};
use crate::core::ledger::{DailyEntry, LedgerSource, OneOffEntry};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

/// Reads the daily and one-off sheets of a spreadsheet through the Sheetson REST API.
pub struct SheetsonSource {
    base_url: String,
    spreadsheet_id: String,
    api_key: String,
    daily_sheet: String,
    one_off_sheet: String,
    row_limit: u32,
    client: reqwest::Client,
}

impl SheetsonSource {
    pub fn new(base_url: &str, spreadsheet_id: &str, api_key: &str) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            api_key: api_key.to_string(),
            daily_sheet: "Daily".to_string(),
            one_off_sheet: "OneOff".to_string(),
            row_limit: 100,
            client: super::http_client()?,
        })
    }

    pub fn with_sheets(mut self, daily_sheet: &str, one_off_sheet: &str) -> Self {
        self.daily_sheet = daily_sheet.to_string();
        self.one_off_sheet = one_off_sheet.to_string();
        self
    }

    pub fn with_row_limit(mut self, row_limit: u32) -> Self {
        self.row_limit = row_limit;
        self
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, sheet: &str) -> Result<Vec<T>> {
        let url = format!(
            "{}/v2/sheets/{}?limit={}",
            self.base_url, sheet, self.row_limit
        );
        debug!("Requesting rows from {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Spreadsheet-Id", &self.spreadsheet_id)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| LedgerError::RowFetch(format!("Request error for sheet {sheet}: {e}")))?;

        if !response.status().is_success() {
            return Err(LedgerError::RowFetch(format!(
                "HTTP error: {} for sheet: {sheet}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| LedgerError::RowFetch(e.to_string()))?;
        let page: SheetPage<T> = serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, response = %text, "Failed to parse sheet response");
            LedgerError::InvalidRow(format!("sheet {sheet}: {e}"))
        })?;
        debug!(rows = page.results.len(), "Received sheet {sheet}");
        Ok(page.results)
    }
}

#[derive(Debug, Deserialize)]
struct SheetPage<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct RawDailyRow {
    id: RawAmount,
    country: String,
    date: String,
    total: RawAmount,
}

#[derive(Debug, Deserialize)]
struct RawOneOffRow {
    country: String,
    total: RawAmount,
}

fn parse_total(raw: &RawAmount, country: &str) -> Result<Decimal> {
    raw.to_decimal()
        .ok_or_else(|| LedgerError::InvalidRow(format!("invalid total {raw:?} for {country}")))
}

impl TryFrom<RawDailyRow> for DailyEntry {
    type Error = LedgerError;

    fn try_from(row: RawDailyRow) -> Result<Self> {
        let country = row.country.trim().to_string();
        let id = row
            .id
            .to_integer()
            .ok_or_else(|| LedgerError::InvalidRow(format!("invalid id {:?}", row.id)))?;
        let date = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d").map_err(|e| {
            LedgerError::InvalidRow(format!("invalid date {} in row {id}: {e}", row.date))
        })?;
        let total = parse_total(&row.total, &country)?;
        Ok(DailyEntry {
            id,
            country,
            date,
            total,
        })
    }
}

impl TryFrom<RawOneOffRow> for OneOffEntry {
    type Error = LedgerError;

    fn try_from(row: RawOneOffRow) -> Result<Self> {
        let country = row.country.trim().to_string();
        let total = parse_total(&row.total, &country)?;
        Ok(OneOffEntry { country, total })
    }
}

#[async_trait]
impl LedgerSource for SheetsonSource {
    #[instrument(name = "SheetsonDaily", skip(self))]
    async fn fetch_daily(&self) -> Result<Vec<DailyEntry>> {
        self.fetch_rows::<RawDailyRow>(&self.daily_sheet)
            .await?
            .into_iter()
            .map(DailyEntry::try_from)
            .collect()
    }

    #[instrument(name = "SheetsonOneOff", skip(self))]
    async fn fetch_one_off(&self) -> Result<Vec<OneOffEntry>> {
        self.fetch_rows::<RawOneOffRow>(&self.one_off_sheet)
            .await?
            .into_iter()
            .map(OneOffEntry::try_from)
            .collect()
    }
}
