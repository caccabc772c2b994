//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog entries carry their price as a display string (`"$60"`). The
//! payment provider needs a bare decimal amount with two fractional digits
//! (`"60.00"`), so [`Price::parse_display`] strips the leading currency symbol
//! and [`Price::provider_value`] formats the amount for the order request.

use core::fmt;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a display price.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// The input string is empty (or only a currency symbol).
    #[error("price cannot be empty")]
    Empty,
    /// The remainder after the currency symbol is not a decimal number.
    #[error("price '{0}' is not a decimal amount")]
    NotANumber(String),
    /// The amount is negative.
    #[error("price '{0}' is negative")]
    Negative(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a display price such as `"$60"` or `"$19.99"`.
    ///
    /// A single leading currency symbol is stripped; the rest must be a
    /// non-negative decimal. A string without a symbol is accepted and
    /// treated as US dollars.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if nothing remains after the symbol, the remainder
    /// is not a decimal, or the amount is negative.
    pub fn parse_display(display: &str) -> Result<Self, PriceError> {
        let trimmed = display.trim();
        let Some(first) = trimmed.chars().next() else {
            return Err(PriceError::Empty);
        };
        let (currency_code, digits) = match CurrencyCode::from_symbol(first) {
            Some(code) => (code, trimmed.strip_prefix(first).unwrap_or(trimmed)),
            None => (CurrencyCode::USD, trimmed),
        };

        let digits = digits.trim();
        if digits.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount =
            Decimal::from_str(digits).map_err(|_| PriceError::NotANumber(display.to_string()))?;
        if amount.is_sign_negative() {
            return Err(PriceError::Negative(display.to_string()));
        }

        Ok(Self::new(amount, currency_code))
    }

    /// Amount formatted for a payment provider: two fractional digits, no symbol.
    #[must_use]
    pub fn provider_value(&self) -> String {
        format!("{:.2}", self.amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// The ISO code as sent to payment providers.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }

    /// The display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '$' => Some(Self::USD),
            '€' => Some(Self::EUR),
            '£' => Some(Self::GBP),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_dollars() {
        let price = Price::parse_display("$60").unwrap();
        assert_eq!(price.amount, Decimal::from(60));
        assert_eq!(price.currency_code, CurrencyCode::USD);
        assert_eq!(price.provider_value(), "60.00");
    }

    #[test]
    fn test_parse_cents() {
        let price = Price::parse_display("$19.9").unwrap();
        assert_eq!(price.provider_value(), "19.90");
        assert_eq!(price.to_string(), "$19.90");
    }

    #[test]
    fn test_parse_without_symbol_defaults_to_usd() {
        let price = Price::parse_display("45").unwrap();
        assert_eq!(price.currency_code, CurrencyCode::USD);
        assert_eq!(price.provider_value(), "45.00");
    }

    #[test]
    fn test_parse_other_symbol() {
        let price = Price::parse_display("€12.50").unwrap();
        assert_eq!(price.currency_code, CurrencyCode::EUR);
        assert_eq!(price.currency_code.code(), "EUR");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(Price::parse_display(""), Err(PriceError::Empty));
        assert_eq!(Price::parse_display("$"), Err(PriceError::Empty));
        assert!(matches!(
            Price::parse_display("$sixty"),
            Err(PriceError::NotANumber(_))
        ));
        assert!(matches!(
            Price::parse_display("$-5"),
            Err(PriceError::Negative(_))
        ));
    }
}
