//! Exchange rate value for a single currency pair on a single day.

use chrono::NaiveDate;

use crate::domain::CurrencyCode;
use crate::error::RateError;

/// Priced currency pair for a calendar date.
///
/// `value` is the number of `target` units per one unit of `base` and is
/// always strictly positive. A zero, negative or non-finite value never
/// becomes a `Rate`; it is reported as a fetch failure instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Rate {
    base: CurrencyCode,
    target: CurrencyCode,
    value: f64,
    date: NaiveDate,
}

impl Rate {
    /// Creates a new rate, rejecting non-positive or non-finite values.
    pub fn new(
        base: CurrencyCode,
        target: CurrencyCode,
        value: f64,
        date: NaiveDate,
    ) -> Result<Self, RateError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(RateError::InvalidRate {
                base: base.to_string(),
                target: target.to_string(),
                value,
            });
        }
        Ok(Self {
            base,
            target,
            value,
            date,
        })
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn target(&self) -> &CurrencyCode {
        &self.target
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// The date the provider says this quote belongs to.
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Day-over-day movement of a base/target price.
///
/// A lower base/target price means one unit of base buys fewer target units,
/// i.e. the target currency got stronger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateChange {
    Down,
    Up,
    Unchanged,
}

impl RateChange {
    /// Classifies `today` against `yesterday` with exact comparison, no tolerance.
    pub fn between(today: f64, yesterday: f64) -> Self {
        if today < yesterday {
            RateChange::Down
        } else if today > yesterday {
            RateChange::Up
        } else {
            RateChange::Unchanged
        }
    }

    /// Human-readable label naming which way the target currency moved.
    pub fn describe(&self, target: &CurrencyCode) -> String {
        match self {
            RateChange::Down => format!("down ({} stronger)", target),
            RateChange::Up => format!("up ({} weaker)", target),
            RateChange::Unchanged => "unchanged".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn test_rate_creation() {
        let rate = Rate::new(code("CAD"), code("JPY"), 106.67, day()).unwrap();
        assert_eq!(rate.base().as_str(), "CAD");
        assert_eq!(rate.target().as_str(), "JPY");
        assert_eq!(rate.value(), 106.67);
        assert_eq!(rate.date(), day());
    }

    #[test]
    fn test_zero_rate_rejected() {
        let result = Rate::new(code("CAD"), code("JPY"), 0.0, day());
        assert!(matches!(result, Err(RateError::InvalidRate { .. })));
    }

    #[test]
    fn test_negative_and_nan_rates_rejected() {
        assert!(Rate::new(code("CAD"), code("JPY"), -1.0, day()).is_err());
        assert!(Rate::new(code("CAD"), code("JPY"), f64::NAN, day()).is_err());
        assert!(Rate::new(code("CAD"), code("JPY"), f64::INFINITY, day()).is_err());
    }

    #[test]
    fn test_change_classification() {
        assert_eq!(RateChange::between(100.0, 110.0), RateChange::Down);
        assert_eq!(RateChange::between(110.0, 100.0), RateChange::Up);
        assert_eq!(RateChange::between(100.0, 100.0), RateChange::Unchanged);
    }

    #[test]
    fn test_change_description() {
        let jpy = code("JPY");
        assert_eq!(RateChange::Down.describe(&jpy), "down (JPY stronger)");
        assert_eq!(RateChange::Up.describe(&jpy), "up (JPY weaker)");
        assert_eq!(RateChange::Unchanged.describe(&jpy), "unchanged");
    }
}
