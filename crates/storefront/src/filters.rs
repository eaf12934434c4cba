//! Custom Askama template filters and display formatting helpers.

use std::fmt::Display;

use chrono::{DateTime, Utc};
use duka_core::{CurrencyCode, Price};
use rust_decimal::Decimal;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Format an amount as `"TZS 12,500"`.
#[must_use]
pub fn money(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}

/// Format a timestamp the way the admin console shows it, e.g.
/// `"March 5, 2026, 08:30 AM"`.
#[must_use]
pub fn long_date(time: DateTime<Utc>) -> String {
    time.format("%B %-d, %Y, %I:%M %p").to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_money() {
        assert_eq!(money(Decimal::from(12_500), CurrencyCode::TZS), "TZS 12,500");
        assert_eq!(money(Decimal::new(12_345, 1), CurrencyCode::KES), "KES 1,234.5");
    }

    #[test]
    fn test_long_date() {
        let time = DateTime::parse_from_rfc3339("2026-03-05T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(long_date(time), "March 5, 2026, 08:30 AM");
    }
}
