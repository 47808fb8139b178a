use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Deserialize;
use std::str::FromStr;

/// A numeric cell as it arrives over the wire: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl RawAmount {
    pub(crate) fn to_decimal(&self) -> Option<Decimal> {
        let text = match self {
            RawAmount::Number(n) => n.to_string(),
            RawAmount::Text(s) => s.trim().to_string(),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }

    pub(crate) fn to_integer(&self) -> Option<i64> {
        self.to_decimal()
            .filter(|d| d.fract().is_zero())
            .and_then(|d| d.to_i64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(json: &str) -> RawAmount {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_numbers_and_strings() {
        assert_eq!(parse("1.17").to_decimal(), Some(dec!(1.17)));
        assert_eq!(parse("190").to_decimal(), Some(dec!(190)));
        assert_eq!(parse(r#"" 12.50 ""#).to_decimal(), Some(dec!(12.50)));
        assert_eq!(parse("1e-3").to_decimal(), Some(dec!(0.001)));
        assert_eq!(parse(r#""abc""#).to_decimal(), None);
    }

    #[test]
    fn test_integers() {
        assert_eq!(parse("7").to_integer(), Some(7));
        assert_eq!(parse(r#""12""#).to_integer(), Some(12));
        assert_eq!(parse("7.5").to_integer(), None);
    }
}
