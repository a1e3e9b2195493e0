//! Slack incoming-webhook notifier.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use fxwatch_types::{Notifier, NotifyError};

/// Posts alerts to a Slack incoming webhook as `{"text": ...}`.
pub struct SlackNotifier {
    client: Client,
    webhook_url: String,
}

impl SlackNotifier {
    pub fn new(webhook_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    #[instrument(skip(self, message), fields(len = message.len()))]
    async fn notify(&self, message: &str) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&serde_json::json!({ "text": message }))
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        if !resp.status().is_success() {
            return Err(NotifyError::Rejected {
                status: resp.status().as_u16(),
            });
        }

        info!("Notification delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_posts_text_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hooks/abc"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({ "text": "say \"hi\"" })))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = SlackNotifier::new(format!("{}/hooks/abc", server.uri()), Client::new());
        notifier.notify("say \"hi\"").await.unwrap();
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("invalid_token"))
            .expect(1)
            .mount(&server)
            .await;

        let notifier = SlackNotifier::new(server.uri(), Client::new());
        let err = notifier.notify("hello").await.unwrap_err();

        assert!(matches!(err, NotifyError::Rejected { status: 403 }));
    }

    #[tokio::test]
    async fn test_unreachable_webhook_is_transport_error() {
        let notifier = SlackNotifier::new("http://127.0.0.1:1/hook", Client::new());
        let err = notifier.notify("hello").await.unwrap_err();

        assert!(matches!(err, NotifyError::Transport(_)));
    }

    #[tokio::test]
    async fn test_empty_webhook_url_is_transport_error() {
        let notifier = SlackNotifier::new("", Client::new());
        let err = notifier.notify("hello").await.unwrap_err();

        assert!(matches!(err, NotifyError::Transport(_)));
    }
}
