//! Cross-rate adapter for providers that only quote against one anchor currency.
//!
//! exchangeratesapi-style free plans price everything in EUR, so CAD/JPY has
//! to be derived from EUR/CAD and EUR/JPY:
//!
//! ```text
//! base/target = (anchor/target) / (anchor/base)
//! CAD/JPY     = EUR/JPY ÷ EUR/CAD = 160 ÷ 1.5 = 106.67
//! ```

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use fxwatch_types::{CurrencyCode, Rate, RateError, RateSource};

use crate::http::{get_json, normalize_base_url};

#[derive(Debug, Deserialize)]
struct AnchoredResponse {
    success: Option<bool>,
    #[serde(default)]
    rates: HashMap<String, f64>,
    error: Option<serde_json::Value>,
}

/// Derives `base`/`target` from two anchor-relative quotes.
///
/// Operand order matters: swapping them silently inverts the pair.
pub fn cross_rate(
    anchor: &CurrencyCode,
    rates: &HashMap<String, f64>,
    base: &CurrencyCode,
    target: &CurrencyCode,
) -> Result<f64, RateError> {
    let anchor_to_base = anchor_quote(anchor, rates, base)?;
    let anchor_to_target = anchor_quote(anchor, rates, target)?;
    Ok(anchor_to_target / anchor_to_base)
}

fn anchor_quote(
    anchor: &CurrencyCode,
    rates: &HashMap<String, f64>,
    currency: &CurrencyCode,
) -> Result<f64, RateError> {
    if currency == anchor {
        return Ok(1.0);
    }
    match rates.get(currency.as_str()) {
        Some(v) if *v != 0.0 => Ok(*v),
        _ => Err(RateError::MissingRate {
            currency: currency.to_string(),
        }),
    }
}

/// Client for anchor-only APIs (`<base>/<YYYY-MM-DD>?base=EUR&symbols=..&access_key=..`).
pub struct ExchangeRatesClient {
    base_url: String,
    api_key: String,
    anchor: CurrencyCode,
    http: Client,
}

impl ExchangeRatesClient {
    pub fn new(base_url: &str, api_key: &str, anchor: CurrencyCode, http: Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            api_key: api_key.to_string(),
            anchor,
            http,
        }
    }
}

#[async_trait]
impl RateSource for ExchangeRatesClient {
    #[instrument(
        name = "CrossRateFetch",
        skip(self),
        fields(anchor = %self.anchor, base = %base, target = %target)
    )]
    async fn fetch_rate(
        &self,
        date: NaiveDate,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Rate, RateError> {
        let url = format!("{}{}", self.base_url, date.format("%Y-%m-%d"));
        let symbols = format!("{},{}", base, target);

        let data: AnchoredResponse = get_json(
            &self.http,
            &url,
            &[
                ("base", self.anchor.as_str()),
                ("symbols", symbols.as_str()),
                ("access_key", self.api_key.as_str()),
            ],
        )
        .await?;

        if data.success == Some(false) {
            let detail = data
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "success=false".to_string());
            return Err(RateError::Provider(detail));
        }

        let value = cross_rate(&self.anchor, &data.rates, base, target)?;
        debug!(value, "Derived cross rate");

        Rate::new(base.clone(), target.clone(), value, date)
    }
}
