//! Exchange rate source port.
//!
//! Implementations are HTTP clients for a specific provider, or mocks.

use chrono::NaiveDate;

use crate::domain::{CurrencyCode, Rate};
use crate::error::RateError;

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateSource: Send + Sync + 'static {
    /// Fetches the `base`/`target` rate for a calendar day.
    ///
    /// The returned [`Rate::date`] is the date the provider reports, which may
    /// be earlier than `date` when the provider falls back to its latest data.
    async fn fetch_rate(
        &self,
        date: NaiveDate,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Rate, RateError>;
}
