//! fxwatch CLI
//!
//! Command-line interface for the fxwatch API. `check` is meant to be run
//! from cron for scheduled checks.

use anyhow::Result;
use clap::{Parser, Subcommand};

use fxwatch_client::FxwatchClient;

#[derive(Parser)]
#[command(name = "fxwatch")]
#[command(author, version, about = "fxwatch rate check CLI", long_about = None)]
struct Cli {
    /// Base URL of the fxwatch API
    #[arg(long, env = "FXWATCH_API_URL", default_value = "http://localhost:8080")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare today's rate with yesterday's
    Check {
        /// Base currency (defaults to the server's BASE_CURRENCY)
        #[arg(long)]
        base: Option<String>,
        /// Target currency (defaults to the server's TARGET_CURRENCY)
        #[arg(long)]
        target: Option<String>,
        /// Send a test notification even if the rate did not move
        #[arg(long)]
        notify: bool,
    },
    /// Start a local webhook sink that prints incoming notifications
    Listen {
        /// Port to listen on
        #[arg(long, default_value = "3001")]
        port: u16,
    },
    /// Check API health
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = FxwatchClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Check {
            base,
            target,
            notify,
        } => {
            let data = client
                .check_rate(base.as_deref(), target.as_deref(), notify)
                .await?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }

        Commands::Listen { port } => {
            let app = axum::Router::new().route("/webhook", axum::routing::post(handle_webhook));
            let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
            println!("Listening for notifications on http://{}/webhook", addr);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

async fn handle_webhook(body: String) -> impl axum::response::IntoResponse {
    println!("{}", notification_text(&body));
    println!("----------------------------------------");
    axum::http::StatusCode::OK
}

/// The `text` field of a chat webhook payload, or the raw body if there is none.
fn notification_text(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("text").and_then(|t| t.as_str()).map(String::from))
        .unwrap_or_else(|| format!("(unrecognised payload) {}", body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_notification_text_from_json() {
        let body = r#"{"text": "📈 CAD/JPY alert: JPY strengthened."}"#;
        assert_eq!(notification_text(body), "📈 CAD/JPY alert: JPY strengthened.");
    }

    #[test]
    fn test_notification_text_falls_back_to_raw_body() {
        assert_eq!(notification_text("ping"), "(unrecognised payload) ping");
        assert_eq!(
            notification_text(r#"{"message": "hi"}"#),
            r#"(unrecognised payload) {"message": "hi"}"#
        );
    }

    #[tokio::test]
    async fn test_webhook_always_acknowledges() {
        let ok = handle_webhook(r#"{"text": "hello"}"#.to_string()).await;
        assert_eq!(ok.into_response().status(), axum::http::StatusCode::OK);

        let junk = handle_webhook("not json".to_string()).await;
        assert_eq!(junk.into_response().status(), axum::http::StatusCode::OK);
    }
}
