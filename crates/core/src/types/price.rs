//! Price parsing and display using decimal arithmetic.
//!
//! Documents in the store carry prices as JSON numbers, numeric strings, or
//! occasionally something else entirely. [`RawPrice`] keeps whatever was
//! stored; [`RawPrice::parse`] turns it into a [`Decimal`] when it can and
//! returns `None` otherwise. Parsing never panics.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price exactly as it was stored in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    /// JSON number.
    Number(f64),
    /// Numeric string such as `"12000"` or `" 9.50 "`.
    Text(String),
    /// Anything else (booleans, objects, arrays).
    Other(serde_json::Value),
}

impl RawPrice {
    /// Parse into a non-negative decimal amount.
    ///
    /// Non-numeric text, non-finite numbers and negative amounts yield `None`.
    #[must_use]
    pub fn parse(&self) -> Option<Decimal> {
        let amount = match self {
            Self::Number(n) => Decimal::try_from(*n).ok()?,
            Self::Text(s) => Decimal::from_str(s.trim()).ok()?,
            Self::Other(_) => return None,
        };
        (!amount.is_sign_negative()).then_some(amount)
    }
}

impl From<f64> for RawPrice {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RawPrice {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// Parse an optional stored price. Missing prices yield `None`.
#[must_use]
pub fn parse_price(raw: Option<&RawPrice>) -> Option<Decimal> {
    raw.and_then(RawPrice::parse)
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
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

    /// Format for display, e.g. `"TZS 12,500"`.
    #[must_use]
    pub fn display(&self) -> String {
        format!("{} {}", self.currency_code.code(), format_amount(self.amount))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes accepted by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    TZS,
    KES,
    UGX,
    USD,
    EUR,
    GBP,
}

impl CurrencyCode {
    /// Three-letter code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TZS => "TZS",
            Self::KES => "KES",
            Self::UGX => "UGX",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
        }
    }
}

/// Error returned when a currency code is not supported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for CurrencyCode {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TZS" => Ok(Self::TZS),
            "KES" => Ok(Self::KES),
            "UGX" => Ok(Self::UGX),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            _ => Err(UnknownCurrency(s.to_owned())),
        }
    }
}

/// Format an amount with thousands separators and at most three decimals.
///
/// `12000` becomes `"12,000"`, `1234.5` becomes `"1,234.5"`.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(3).normalize();
    let digits = rounded.abs().to_string();
    let (whole, fraction) = digits
        .split_once('.')
        .map_or((digits.as_str(), None), |(w, f)| (w, Some(f)));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_and_text() {
        assert_eq!(RawPrice::Number(12.5).parse(), Some(Decimal::new(125, 1)));
        assert_eq!(RawPrice::from(" 9000 ").parse(), Some(Decimal::from(9000)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(RawPrice::from("call us").parse(), None);
        assert_eq!(RawPrice::from("").parse(), None);
        assert_eq!(RawPrice::Number(f64::NAN).parse(), None);
        assert_eq!(RawPrice::Number(-3.0).parse(), None);
        assert_eq!(RawPrice::Other(serde_json::Value::Bool(true)).parse(), None);
        assert_eq!(parse_price(None), None);
    }

    #[test]
    fn test_deserialize_any_shape() {
        let prices: Vec<RawPrice> =
            serde_json::from_str(r#"[1500, "2500.75", null, {"amount": 1}]"#).unwrap();
        assert_eq!(prices[0].parse(), Some(Decimal::from(1500)));
        assert_eq!(prices[1].parse(), Some(Decimal::new(250_075, 2)));
        assert_eq!(prices[2].parse(), None);
        assert_eq!(prices[3].parse(), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from(0)), "0");
        assert_eq!(format_amount(Decimal::from(999)), "999");
        assert_eq!(format_amount(Decimal::from(12_000)), "12,000");
        assert_eq!(format_amount(Decimal::from(1_234_567)), "1,234,567");
        assert_eq!(format_amount(Decimal::new(12_345, 1)), "1,234.5");
        assert_eq!(format_amount(Decimal::new(15_000, 2)), "150");
        assert_eq!(format_amount(Decimal::new(-4_500, 0)), "-4,500");
    }

    #[test]
    fn test_price_display() {
        let price = Price::new(Decimal::from(45_000), CurrencyCode::TZS);
        assert_eq!(price.display(), "TZS 45,000");
        assert_eq!(price.to_string(), "TZS 45,000");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("tzs".parse::<CurrencyCode>().unwrap(), CurrencyCode::TZS);
        assert_eq!("USD".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert!("XYZ".parse::<CurrencyCode>().is_err());
    }
}
