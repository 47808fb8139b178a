//! Static country reference data

use crate::core::error::{LedgerError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const BUNDLED_COUNTRIES: &str = include_str!("../../data/countries.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub country_code: String,
    pub currency_code: String,
    pub country_name: String,
}

/// A single attribute of a [`CountryRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountryField {
    CurrencyCode,
    CountryName,
    CountryCode,
}

impl CountryRecord {
    pub fn field(&self, field: CountryField) -> &str {
        match field {
            CountryField::CurrencyCode => &self.currency_code,
            CountryField::CountryName => &self.country_name,
            CountryField::CountryCode => &self.country_code,
        }
    }
}

/// Read-only lookup from country code to its record.
#[derive(Debug, Clone)]
pub struct CountryDirectory {
    records: HashMap<String, CountryRecord>,
}

impl CountryDirectory {
    /// Builds the directory, rejecting duplicate country codes.
    pub fn new(records: Vec<CountryRecord>) -> Result<Self> {
        let mut map = HashMap::with_capacity(records.len());
        for mut record in records {
            record.country_code = record.country_code.trim().to_string();
            if map.contains_key(&record.country_code) {
                return Err(LedgerError::DuplicateCountry(record.country_code));
            }
            map.insert(record.country_code.clone(), record);
        }
        debug!(countries = map.len(), "Loaded country directory");
        Ok(Self { records: map })
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let records: Vec<CountryRecord> =
            serde_json::from_str(json).context("Failed to parse country data")?;
        Ok(Self::new(records)?)
    }

    /// The dataset shipped with the binary.
    pub fn bundled() -> anyhow::Result<Self> {
        Self::from_json(BUNDLED_COUNTRIES)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read country data: {}", path.as_ref().display())
        })?;
        Self::from_json(&json)
    }

    pub fn record(&self, country_code: &str) -> Result<&CountryRecord> {
        let code = country_code.trim();
        self.records
            .get(code)
            .ok_or_else(|| LedgerError::CountryNotFound(code.to_string()))
    }

    pub fn lookup(&self, field: CountryField, country_code: &str) -> Result<&str> {
        self.record(country_code).map(|r| r.field(field))
    }

    /// Plural form of [`lookup`](Self::lookup); fails on the first unknown code.
    pub fn lookup_many<S: AsRef<str>>(
        &self,
        field: CountryField,
        country_codes: &[S],
    ) -> Result<Vec<String>> {
        country_codes
            .iter()
            .map(|c| self.lookup(field, c.as_ref()).map(str::to_string))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
