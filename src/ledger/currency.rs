//! Currency Conversion
//!
//! A static exchange-rate table relative to a base currency. Rates are
//! injected by the caller (a file or hard-coded table); nothing is
//! fetched. Same-code conversion is the identity and needs no entry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Exchange rates relative to a base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    /// Base currency code the rates are expressed in
    pub base: String,
    /// Code to units-of-base per 1 unit of that currency
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl ExchangeRates {
    /// An empty table for the given base currency.
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().to_ascii_uppercase(),
            rates: HashMap::new(),
        }
    }

    /// Add a rate: 1 unit of `code` equals `rate` units of the base.
    pub fn with_rate(mut self, code: impl Into<String>, rate: f64) -> Self {
        self.rates.insert(code.into().to_ascii_uppercase(), rate);
        self
    }

    /// Load a rate table from a JSON file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let rates: Self = serde_json::from_str(&content)?;
        Ok(rates)
    }

    /// Units of base per 1 unit of `code`.
    fn rate_to_base(&self, code: &str) -> crate::Result<f64> {
        if code.eq_ignore_ascii_case(&self.base) {
            return Ok(1.0);
        }
        self.rates
            .get(code)
            .or_else(|| self.rates.get(&code.to_ascii_uppercase()))
            .copied()
            .filter(|r| r.is_finite() && *r > 0.0)
            .ok_or_else(|| crate::Error::Currency(format!("no usable rate for '{code}'")))
    }

    /// Convert an amount between two currencies through the base.
    pub fn convert(&self, amount: f64, from: &str, to: &str) -> crate::Result<f64> {
        if from.eq_ignore_ascii_case(to) {
            return Ok(amount);
        }
        Ok(amount * self.rate_to_base(from)? / self.rate_to_base(to)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ExchangeRates {
        ExchangeRates::new("USD")
            .with_rate("EUR", 1.10)
            .with_rate("MXN", 0.05)
    }

    #[test]
    fn test_same_currency_is_identity() {
        let rates = ExchangeRates::new("USD");
        assert_eq!(rates.convert(42.0, "USD", "USD").unwrap(), 42.0);
        // Identity holds even for codes the table has never seen.
        assert_eq!(rates.convert(42.0, "JPY", "JPY").unwrap(), 42.0);
    }

    #[test]
    fn test_convert_to_base() {
        assert!((table().convert(100.0, "EUR", "USD").unwrap() - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_from_base() {
        assert!((table().convert(110.0, "USD", "EUR").unwrap() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_convert_cross_rate() {
        // EUR -> MXN through USD: 10 EUR = 11 USD = 220 MXN
        assert!((table().convert(10.0, "EUR", "MXN").unwrap() - 220.0).abs() < 1e-9);
    }

    #[test]
    fn test_case_insensitive_codes() {
        assert!((table().convert(100.0, "eur", "usd").unwrap() - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_code_is_error() {
        let result = table().convert(10.0, "GBP", "USD");
        assert!(matches!(result, Err(crate::Error::Currency(_))));
    }

    #[test]
    fn test_unusable_rate_is_error() {
        let rates = ExchangeRates::new("USD").with_rate("XXX", 0.0);
        assert!(rates.convert(10.0, "XXX", "USD").is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let rates = table();
        let json = serde_json::to_string(&rates).unwrap();
        let back: ExchangeRates = serde_json::from_str(&json).unwrap();
        assert_eq!(back, rates);
    }

    #[test]
    fn test_deserialize_without_rates_map() {
        let rates: ExchangeRates = serde_json::from_str(r#"{"base":"EUR"}"#).unwrap();
        assert_eq!(rates.base, "EUR");
        assert!(rates.rates.is_empty());
        assert_eq!(rates.convert(5.0, "EUR", "EUR").unwrap(), 5.0);
    }
}
