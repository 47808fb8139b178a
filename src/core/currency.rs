//! Currency conversion abstractions

use crate::core::error::{LedgerError, Result};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Supplies the full rate set for a home currency, expressed as units of
/// foreign currency per one unit of home currency.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, home_currency: &str) -> Result<HashMap<String, Decimal>>;
}

/// Home-to-foreign rates restricted to the currencies a run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    home_currency: String,
    rates: HashMap<String, Decimal>,
}

impl RateTable {
    /// Restricts `all_rates` to exactly `required`. Fails listing every
    /// required code that has no rate; rates that are present but not
    /// positive are only reported once nothing is missing.
    pub fn new<S: AsRef<str>>(
        home_currency: &str,
        all_rates: &HashMap<String, Decimal>,
        required: &[S],
    ) -> Result<Self> {
        let mut missing: Vec<String> = Vec::new();
        let mut invalid: Option<LedgerError> = None;
        let mut rates = HashMap::with_capacity(required.len());

        for code in required.iter().map(AsRef::as_ref) {
            match all_rates.get(code) {
                Some(rate) if *rate <= Decimal::ZERO => {
                    invalid.get_or_insert_with(|| LedgerError::InvalidRate {
                        currency: code.to_string(),
                        rate: *rate,
                    });
                }
                Some(rate) => {
                    rates.insert(code.to_string(), *rate);
                }
                None => {
                    if !missing.iter().any(|m| m == code) {
                        missing.push(code.to_string());
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(LedgerError::MissingCurrency(missing));
        }
        if let Some(err) = invalid {
            return Err(err);
        }

        Ok(Self {
            home_currency: home_currency.to_string(),
            rates,
        })
    }

    /// Fetches every rate for `home_currency` in one provider call, then
    /// restricts the result to `required`.
    #[instrument(name = "RateTableFetch", skip(provider, required))]
    pub async fn fetch<S: AsRef<str>>(
        provider: &(dyn RateProvider + Send + Sync),
        home_currency: &str,
        required: &[S],
    ) -> Result<Self> {
        let all_rates = provider.fetch_rates(home_currency).await?;
        debug!(
            available = all_rates.len(),
            required = required.len(),
            "Received rate set"
        );
        Self::new(home_currency, &all_rates, required)
    }

    pub fn home_currency(&self) -> &str {
        &self.home_currency
    }

    pub fn rate(&self, currency_code: &str) -> Option<Decimal> {
        self.rates.get(currency_code).copied()
    }

    pub fn currencies(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Converts `amount` in `currency_code` into the home currency, rounded
    /// to 2 places with banker's rounding.
    pub fn convert(&self, amount: Decimal, currency_code: &str) -> Result<Decimal> {
        let rate = self
            .rate(currency_code)
            .ok_or_else(|| LedgerError::UnknownCurrency(currency_code.to_string()))?;
        let converted = amount
            .checked_div(rate)
            .ok_or_else(|| {
                LedgerError::AmountOverflow(format!("{amount} {currency_code} in home currency"))
            })?
            .round_dp(2);
        debug!("Converted {amount} {currency_code} at rate {rate}: {converted}");
        Ok(converted)
    }
}
