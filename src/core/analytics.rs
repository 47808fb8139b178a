//! Folds daily and one-off entries into home-currency spending statistics.
use crate::core::country::{CountryDirectory, CountryField};
use crate::core::currency::{RateProvider, RateTable};
use crate::core::error::{LedgerError, Result};
use crate::core::ledger::{DailyEntry, OneOffEntry};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// How the number of daily entries is derived when spreading one-off spend
/// across days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryCount {
    /// Length of the daily entry sequence.
    #[default]
    Rows,
    /// `id - 1` of the last daily entry, for sheets whose ids are a running
    /// counter that starts at 2.
    LastId,
}

/// Average daily spend in one visited country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryAverage {
    pub country_code: String,
    pub country: String,
    pub currency: String,
    pub average_local: Decimal,
    pub average_home: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub home_currency: String,
    pub per_country: Vec<CountryAverage>,
    pub last_country_name: String,
    pub last_country_average: CountryAverage,
    /// Mean of the per-country home averages; each country weighs the same
    /// regardless of how many days were logged there.
    pub overall_daily_average: Decimal,
    pub overall_average: Decimal,
    pub recency_message: Option<String>,
}

fn checked_add(lhs: Decimal, rhs: Decimal, what: impl FnOnce() -> String) -> Result<Decimal> {
    lhs.checked_add(rhs)
        .ok_or_else(|| LedgerError::AmountOverflow(what()))
}

fn checked_div(lhs: Decimal, rhs: Decimal, what: impl FnOnce() -> String) -> Result<Decimal> {
    lhs.checked_div(rhs)
        .ok_or_else(|| LedgerError::AmountOverflow(what()))
}

/// Distinct country codes of the daily entries, in first-seen order.
pub fn visited_countries(daily: &[DailyEntry]) -> Vec<String> {
    let mut countries: Vec<String> = Vec::new();
    for entry in daily {
        let code = entry.country.trim();
        if !countries.iter().any(|c| c == code) {
            countries.push(code.to_string());
        }
    }
    countries
}

/// Currencies a run needs rates for: those of the visited countries first,
/// then any that only appear in one-off entries. Each code appears once.
pub fn required_currencies(
    directory: &CountryDirectory,
    daily: &[DailyEntry],
    one_off: &[OneOffEntry],
) -> Result<Vec<String>> {
    let mut currencies: Vec<String> = Vec::new();
    let visited = visited_countries(daily);
    let one_off_countries = one_off.iter().map(|e| e.country.trim());

    for code in visited.iter().map(String::as_str).chain(one_off_countries) {
        let currency = directory.lookup(CountryField::CurrencyCode, code)?;
        if !currencies.iter().any(|c| c == currency) {
            currencies.push(currency.to_string());
        }
    }
    Ok(currencies)
}

pub struct AggregationEngine<'a> {
    directory: &'a CountryDirectory,
    rates: RateTable,
    daily: Vec<DailyEntry>,
    one_off: Vec<OneOffEntry>,
    visited: Vec<String>,
    entry_count: EntryCount,
}

impl<'a> AggregationEngine<'a> {
    /// Builds an engine from rows and a pre-fetched rate table. Performs no I/O.
    pub fn new(
        directory: &'a CountryDirectory,
        rates: RateTable,
        daily: Vec<DailyEntry>,
        one_off: Vec<OneOffEntry>,
    ) -> Result<Self> {
        if daily.is_empty() {
            return Err(LedgerError::NoDailyEntries);
        }
        let visited = visited_countries(&daily);
        debug!(countries = ?visited, "Discovered visited countries");

        Ok(Self {
            directory,
            rates,
            daily,
            one_off,
            visited,
            entry_count: EntryCount::default(),
        })
    }

    /// Resolves the currencies the rows need, fetches their rates once and
    /// builds the engine.
    #[instrument(name = "AggregationBuild", skip_all, fields(home = %home_currency))]
    pub async fn build(
        directory: &'a CountryDirectory,
        provider: &(dyn RateProvider + Send + Sync),
        home_currency: &str,
        daily: Vec<DailyEntry>,
        one_off: Vec<OneOffEntry>,
    ) -> Result<Self> {
        if daily.is_empty() {
            return Err(LedgerError::NoDailyEntries);
        }
        let currencies = required_currencies(directory, &daily, &one_off)?;
        debug!(?currencies, "Fetching rates for required currencies");
        let rates = RateTable::fetch(provider, home_currency, &currencies).await?;
        Self::new(directory, rates, daily, one_off)
    }

    pub fn with_entry_count(mut self, entry_count: EntryCount) -> Self {
        self.entry_count = entry_count;
        self
    }

    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    fn last_entry(&self) -> Result<&DailyEntry> {
        self.daily.last().ok_or(LedgerError::NoDailyEntries)
    }

    fn currency_of(&self, country_code: &str) -> Result<&str> {
        self.directory
            .lookup(CountryField::CurrencyCode, country_code)
    }

    /// Describes the most recent entry if it was logged today or yesterday.
    pub fn recent_spending(&self, today: NaiveDate) -> Result<Option<String>> {
        let last = self.last_entry()?;
        let prefix = if last.date == today {
            "Today"
        } else if today.pred_opt() == Some(last.date) {
            "Yesterday"
        } else {
            debug!(last_date = %last.date, %today, "No recent entry");
            return Ok(None);
        };

        let currency = self.currency_of(&last.country)?;
        let converted = self.rates.convert(last.total, currency)?;
        Ok(Some(format!(
            "{prefix} you spent {:.2} {currency} ({} {converted:.2})",
            last.total.round_dp(2),
            self.rates.home_currency()
        )))
    }

    /// Per-country average of the daily entries, in first-seen order.
    pub fn country_averages(&self) -> Result<Vec<CountryAverage>> {
        let mut order: Vec<String> = Vec::new();
        let mut totals: HashMap<String, (Decimal, u32)> = HashMap::new();
        for entry in &self.daily {
            let code = entry.country.trim();
            let slot = totals.entry(code.to_string()).or_insert_with(|| {
                order.push(code.to_string());
                (Decimal::ZERO, 0)
            });
            slot.0 = checked_add(slot.0, entry.total, || format!("daily total for {code}"))?;
            slot.1 += 1;
        }

        let mut averages = Vec::with_capacity(order.len());
        for code in order {
            let (total, count) = totals[&code];
            if count == 0 {
                continue;
            }
            let record = self.directory.record(&code)?;
            let average_local = checked_div(total, Decimal::from(count), || {
                format!("daily average for {code}")
            })?;
            let average_home = self.rates.convert(average_local, &record.currency_code)?;
            averages.push(CountryAverage {
                country_code: code,
                country: record.country_name.clone(),
                currency: record.currency_code.clone(),
                average_local,
                average_home,
            });
        }
        Ok(averages)
    }

    /// Sum of one-off spend, converted per country and added in home currency.
    pub fn one_off_home_total(&self) -> Result<Decimal> {
        let mut order: Vec<String> = Vec::new();
        let mut totals: HashMap<String, Decimal> = HashMap::new();
        for entry in &self.one_off {
            let code = entry.country.trim();
            let slot = totals.entry(code.to_string()).or_insert_with(|| {
                order.push(code.to_string());
                Decimal::ZERO
            });
            *slot = checked_add(*slot, entry.total, || format!("one-off total for {code}"))?;
        }

        let mut home_total = Decimal::ZERO;
        for code in &order {
            let currency = self.currency_of(code)?;
            let converted = self.rates.convert(totals[code], currency)?;
            home_total = checked_add(home_total, converted, || "one-off home total".to_string())?;
        }
        Ok(home_total)
    }

    /// Number of days one-off spend is spread over.
    pub fn entry_count(&self) -> Result<i64> {
        let count = match self.entry_count {
            EntryCount::Rows => self.daily.len() as i64,
            EntryCount::LastId => self.last_entry()?.id - 1,
        };
        if count <= 0 {
            return Err(LedgerError::InvalidEntryCount(count));
        }
        Ok(count)
    }

    #[instrument(name = "Summarize", skip(self))]
    pub fn summarize(&self, today: NaiveDate) -> Result<SummaryResult> {
        let per_country = self.country_averages()?;
        let one_off_total = self.one_off_home_total()?;
        let entries = self.entry_count()?;

        let last = self.last_entry()?;
        let last_code = last.country.trim();
        let last_country_name = self
            .directory
            .lookup(CountryField::CountryName, last_code)?
            .to_string();
        let last_country_average = per_country
            .iter()
            .find(|avg| avg.country_code == last_code)
            .cloned()
            .ok_or_else(|| LedgerError::CountryNotFound(last_code.to_string()))?;

        let home_sum = per_country.iter().try_fold(Decimal::ZERO, |sum, avg| {
            checked_add(sum, avg.average_home, || "sum of country averages".to_string())
        })?;
        let overall_daily_average = checked_div(home_sum, Decimal::from(self.visited.len()), || {
            "overall daily average".to_string()
        })?;
        let one_off_per_entry = checked_div(one_off_total, Decimal::from(entries), || {
            "one-off spend per entry".to_string()
        })?;
        let overall_average = checked_add(overall_daily_average, one_off_per_entry, || {
            "overall average".to_string()
        })?;
        debug!(
            %overall_daily_average,
            %one_off_total,
            entries,
            "Computed overall averages"
        );

        Ok(SummaryResult {
            home_currency: self.rates.home_currency().to_string(),
            per_country,
            last_country_name,
            last_country_average,
            overall_daily_average,
            overall_average,
            recency_message: self.recent_spending(today)?,
        })
    }
}
