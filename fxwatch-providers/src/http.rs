//! Shared HTTP plumbing for the provider adapters.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use fxwatch_types::RateError;

/// Builds the outbound client used by every adapter.
///
/// The timeout bounds each request end to end; nothing else in the crate
/// cancels a slow provider.
pub fn build_client(timeout: Duration) -> anyhow::Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("fxwatch/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()?;
    Ok(client)
}

/// Ensures a base URL ends in exactly one `/` so paths can be appended.
pub(crate) fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

/// Issues a GET and decodes a JSON body.
///
/// A 404 maps to [`RateError::NotFound`]; every other non-2xx status maps to
/// [`RateError::Status`]. `url` must not carry secrets since it ends up in
/// error messages and logs; pass credentials through `query`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, RateError> {
    debug!("GET {}", url);

    let resp = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| RateError::Transport {
            url: url.to_string(),
            message: e.without_url().to_string(),
        })?;

    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(RateError::NotFound(format!("{} returned {}", url, status)));
    }
    if !status.is_success() {
        return Err(RateError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = resp.text().await.map_err(|e| RateError::Transport {
        url: url.to_string(),
        message: format!("failed to read response body: {}", e.without_url()),
    })?;

    serde_json::from_str(&body)
        .map_err(|e| RateError::Malformed(format!("failed to parse JSON from {}: {}", url, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://api.frankfurter.app"),
            "https://api.frankfurter.app/"
        );
        assert_eq!(
            normalize_base_url("https://api.frankfurter.app//"),
            "https://api.frankfurter.app/"
        );
    }
}
