//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use fxwatch_types::{CurrencyCode, Notifier, RateSource};

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::RateChecker;
use crate::openapi::ApiDoc;

/// HTTP Server for the rate check API.
pub struct HttpServer<S: RateSource, N: Notifier> {
    state: Arc<AppState<S, N>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<S: RateSource, N: Notifier> HttpServer<S, N> {
    /// Creates a new HTTP server. Requests that omit a currency use the
    /// given default pair.
    pub fn new(
        checker: RateChecker<S, N>,
        default_base: CurrencyCode,
        default_target: CurrencyCode,
    ) -> Self {
        // 30 checks/min per pair
        let rate_limiter =
            RateLimiterState::new(30, default_base.clone(), default_target.clone());

        Self {
            state: Arc::new(AppState {
                checker,
                default_base,
                default_target,
            }),
            rate_limiter: Arc::new(rate_limiter),
        }
    }

    /// Replaces the per-pair rate limit.
    pub fn with_rate_limit(mut self, requests_per_minute: u32) -> Self {
        self.rate_limiter = Arc::new(RateLimiterState::new(
            requests_per_minute,
            self.state.default_base.clone(),
            self.state.default_target.clone(),
        ));
        self
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route("/check-rate", get(handlers::check_rate::<S, N>))
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(metrics)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
