//! Frankfurter adapter: direct base→target quotes with latest-date fallback.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{instrument, warn};

use fxwatch_types::{CurrencyCode, Rate, RateError, RateSource};

use crate::http::{get_json, normalize_base_url};

#[derive(Debug, Deserialize)]
struct FrankfurterResponse {
    date: String,
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// Client for Frankfurter-style APIs (`<base>/<YYYY-MM-DD>?from=..&to=..`).
///
/// When a dated request is answered with 404 the client asks `<base>/latest`
/// once and reports the date that endpoint returns.
pub struct FrankfurterClient {
    base_url: String,
    http: Client,
}

impl FrankfurterClient {
    pub fn new(base_url: &str, http: Client) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            http,
        }
    }

    async fn fetch_endpoint(
        &self,
        endpoint: &str,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Rate, RateError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let data: FrankfurterResponse = get_json(
            &self.http,
            &url,
            &[("from", base.as_str()), ("to", target.as_str())],
        )
        .await?;

        let value = data.rates.get(target.as_str()).copied().unwrap_or(0.0);
        if value == 0.0 {
            return Err(RateError::MissingRate {
                currency: target.to_string(),
            });
        }

        let actual_date = NaiveDate::parse_from_str(&data.date, "%Y-%m-%d").map_err(|e| {
            RateError::Malformed(format!("invalid date {:?} from {}: {}", data.date, url, e))
        })?;

        Rate::new(base.clone(), target.clone(), value, actual_date)
    }
}

#[async_trait]
impl RateSource for FrankfurterClient {
    #[instrument(name = "FrankfurterFetch", skip(self), fields(base = %base, target = %target))]
    async fn fetch_rate(
        &self,
        date: NaiveDate,
        base: &CurrencyCode,
        target: &CurrencyCode,
    ) -> Result<Rate, RateError> {
        let dated = date.format("%Y-%m-%d").to_string();
        match self.fetch_endpoint(&dated, base, target).await {
            Err(e) if e.is_not_found() => {
                warn!("No rate published for {}, falling back to latest: {}", dated, e);
                self.fetch_endpoint("latest", base, target).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn client_for(server: &MockServer) -> FrankfurterClient {
        FrankfurterClient::new(&server.uri(), Client::new())
    }

    fn body(date: &str, target: &str, value: f64) -> serde_json::Value {
        serde_json::json!({
            "amount": 1.0,
            "base": "CAD",
            "date": date,
            "rates": { target: value }
        })
    }

    #[tokio::test]
    async fn test_fetch_rate_for_date() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025-03-14"))
            .and(query_param("from", "CAD"))
            .and(query_param("to", "JPY"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(body("2025-03-14", "JPY", 106.5)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let rate = client_for(&server)
            .fetch_rate(day(14), &code("CAD"), &code("JPY"))
            .await
            .unwrap();

        assert_eq!(rate.value(), 106.5);
        assert_eq!(rate.date(), day(14));
        assert_eq!(rate.base().as_str(), "CAD");
        assert_eq!(rate.target().as_str(), "JPY");
    }

    #[tokio::test]
    async fn test_not_found_falls_back_to_latest_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025-03-16"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("from", "CAD"))
            .and(query_param("to", "JPY"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(body("2025-03-14", "JPY", 105.0)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let rate = client_for(&server)
            .fetch_rate(day(16), &code("CAD"), &code("JPY"))
            .await
            .unwrap();

        assert_eq!(rate.value(), 105.0);
        // The provider's date wins over the requested one.
        assert_eq!(rate.date(), day(14));
    }

    #[tokio::test]
    async fn test_latest_failure_is_not_retried_again() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025-03-16"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_rate(day(16), &code("CAD"), &code("JPY"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025-03-14"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("2025-03-14", "JPY", 1.0)))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_rate(day(14), &code("CAD"), &code("JPY"))
            .await
            .unwrap_err();

        assert!(matches!(err, RateError::Status { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025-03-14"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("2025-03-14", "JPY", 1.0)))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_rate(day(14), &code("CAD"), &code("JPY"))
            .await
            .unwrap_err();

        assert!(matches!(err, RateError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_missing_target_fails() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025-03-14"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("2025-03-14", "USD", 0.7)))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_rate(day(14), &code("CAD"), &code("JPY"))
            .await
            .unwrap_err();

        assert!(matches!(err, RateError::MissingRate { currency } if currency == "JPY"));
    }

    #[tokio::test]
    async fn test_zero_rate_counts_as_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025-03-14"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body("2025-03-14", "JPY", 0.0)))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_rate(day(14), &code("CAD"), &code("JPY"))
            .await
            .unwrap_err();

        assert!(matches!(err, RateError::MissingRate { .. }));
    }

    #[tokio::test]
    async fn test_unparseable_date_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2025-03-14"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(body("14/03/2025", "JPY", 106.0)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_rate(day(14), &code("CAD"), &code("JPY"))
            .await
            .unwrap_err();

        assert!(matches!(err, RateError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on port 1.
        let client = FrankfurterClient::new("http://127.0.0.1:1", Client::new());

        let err = client
            .fetch_rate(day(14), &code("CAD"), &code("JPY"))
            .await
            .unwrap_err();

        assert!(matches!(err, RateError::Transport { .. }));
    }
}
