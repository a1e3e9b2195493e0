//! # fxwatch Client SDK
//!
//! A typed Rust client for the fxwatch API.

use fxwatch_types::{ApiResponse, RateCheckData};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// fxwatch API client.
pub struct FxwatchClient {
    base_url: String,
    http: Client,
}

impl FxwatchClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Runs a rate check. `None` currencies use the server's configured pair.
    pub async fn check_rate(
        &self,
        base: Option<&str>,
        target: Option<&str>,
        force_notify: bool,
    ) -> Result<RateCheckData, ClientError> {
        let mut query: Vec<(&str, &str)> = Vec::new();
        if let Some(base) = base {
            query.push(("base", base));
        }
        if let Some(target) = target {
            query.push(("target", target));
        }
        if force_notify {
            query.push(("notification", "true"));
        }

        let resp = self
            .http
            .get(format!("{}/check-rate", self.base_url))
            .query(&query)
            .send()
            .await?;
        let envelope: ApiResponse<RateCheckData> = self.handle_response(resp).await?;

        envelope.data.ok_or_else(|| ClientError::Api {
            status: 200,
            message: format!("response had no data: {}", envelope.message),
        })
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
