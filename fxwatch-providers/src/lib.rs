//! # fxwatch Providers
//!
//! Concrete outbound adapters for the rate checker.
//! This crate provides the HTTP rate sources that implement the `RateSource`
//! port and the Slack webhook that implements the `Notifier` port.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use fxwatch_types::{CurrencyCode, Rate, RateError, RateSource};

pub mod exchangerates;
pub mod frankfurter;
pub mod http;
pub mod slack;

pub use exchangerates::ExchangeRatesClient;
pub use frankfurter::FrankfurterClient;
pub use http::build_client;
pub use slack::SlackNotifier;

/// Which upstream API answers rate queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// Direct quotes, free, no API key.
    Frankfurter,
    /// Anchor-only quotes, requires an access key.
    ExchangeRates,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "frankfurter" => Ok(ProviderKind::Frankfurter),
            "exchangerates" => Ok(ProviderKind::ExchangeRates),
            _ => Err(format!(
                "Unknown provider: {}. Supported: frankfurter, exchangerates",
                s
            )),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Frankfurter => f.write_str("frankfurter"),
            ProviderKind::ExchangeRates => f.write_str("exchangerates"),
        }
    }
}

/// Provider settings read once at startup.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub kind: ProviderKind,
    pub frankfurter_url: String,
    pub exchange_rate_url: String,
    pub exchange_rate_api_key: String,
    pub anchor: CurrencyCode,
    pub timeout: Duration,
}

/// Unified rate source wrapper, picked by [`ProviderKind`].
pub enum RateProvider {
    Frankfurter(FrankfurterClient),
    ExchangeRates(ExchangeRatesClient),
}

/// Build a rate source from the configured provider.
///
/// # Examples
///
/// ```ignore
/// let source = build_rate_source(&settings)?;
/// let rate = source.fetch_rate(today, &base, &target).await?;
/// ```
pub fn build_rate_source(settings: &ProviderSettings) -> anyhow::Result<RateProvider> {
    let client = build_client(settings.timeout)?;

    let provider = match settings.kind {
        ProviderKind::Frankfurter => {
            RateProvider::Frankfurter(FrankfurterClient::new(&settings.frankfurter_url, client))
        }
        ProviderKind::ExchangeRates => {
            if settings.exchange_rate_url.trim().is_empty() {
                anyhow::bail!("EXCHANGE_RATE_API_URL is required for the exchangerates provider");
            }
            if settings.exchange_rate_api_key.trim().is_empty() {
                anyhow::bail!("EXCHANGE_RATE_API_KEY is required for the exchangerates provider");
            }
            RateProvider::ExchangeRates(ExchangeRatesClient::new(
                &settings.exchange_rate_url,
                &settings.exchange_rate_api_key,
                settings.anchor.clone(),
                client,
            ))
        }
    };

    tracing::info!("Using {} rate provider", settings.kind);
    Ok(provider)
}

#[async_trait]
impl RateSource for RateProvider {
    async fn fetch_rate(
        &self,
        date: NaiveDate,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Rate, RateError> {
        match self {
            RateProvider::Frankfurter(inner) => inner.fetch_rate(date, base, target).await,
            RateProvider::ExchangeRates(inner) => inner.fetch_rate(date, base, target).await,
        }
    }
}
