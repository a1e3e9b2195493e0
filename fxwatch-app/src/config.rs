//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::{Context, anyhow};

use fxwatch_providers::{ProviderKind, ProviderSettings};
use fxwatch_types::CurrencyCode;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub base_currency: CurrencyCode,
    pub target_currency: CurrencyCode,
    pub provider: ProviderSettings,
    pub slack_webhook_url: String,
    pub rate_limit_per_minute: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str, fallback: &str| lookup(key).unwrap_or_else(|| fallback.to_string());

        let port = var("APP_PORT", "8080")
            .parse()
            .context("APP_PORT must be a port number")?;

        let base_currency = currency(&var("BASE_CURRENCY", "CAD"), "BASE_CURRENCY")?;
        let target_currency = currency(&var("TARGET_CURRENCY", "JPY"), "TARGET_CURRENCY")?;

        let kind: ProviderKind = var("API_PROVIDER", "frankfurter")
            .parse()
            .map_err(|e: String| anyhow!(e))?;

        let timeout_secs: u64 = var("HTTP_TIMEOUT_SECS", "10")
            .parse()
            .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?;

        let provider = ProviderSettings {
            kind,
            frankfurter_url: var("FRANKFURTER_API_URL", "https://api.frankfurter.app/"),
            exchange_rate_url: var("EXCHANGE_RATE_API_URL", ""),
            exchange_rate_api_key: var("EXCHANGE_RATE_API_KEY", ""),
            anchor: currency(&var("EXCHANGE_RATE_ANCHOR", "EUR"), "EXCHANGE_RATE_ANCHOR")?,
            timeout: Duration::from_secs(timeout_secs),
        };

        let rate_limit_per_minute = var("RATE_LIMIT_PER_MINUTE", "30")
            .parse()
            .context("RATE_LIMIT_PER_MINUTE must be a number")?;

        Ok(Self {
            port,
            base_currency,
            target_currency,
            provider,
            slack_webhook_url: var("SLACK_WEBHOOK_URL", ""),
            rate_limit_per_minute,
        })
    }
}

fn currency(raw: &str, key: &str) -> anyhow::Result<CurrencyCode> {
    raw.parse().map_err(|e: String| anyhow!("{}: {}", key, e))
}
