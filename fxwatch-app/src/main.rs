//! # fxwatch Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the configured rate provider and the Slack notifier
//! - Create the rate checker
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

use fxwatch_hex::{RateChecker, inbound::HttpServer};
use fxwatch_providers::{SlackNotifier, build_client, build_rate_source};

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("fxwatch"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // OpenTelemetry export is opt-in: only when a collector is configured
    let otel = match std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        Ok(_) => Some(init_tracer()?),
        Err(_) => None,
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()).boxed());

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "info,fxwatch_app=debug,fxwatch_hex=debug,fxwatch_providers=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!(
        "Starting fxwatch on port {} watching {}/{}",
        config.port,
        config.base_currency,
        config.target_currency
    );
    if config.slack_webhook_url.is_empty() {
        tracing::warn!("SLACK_WEBHOOK_URL is not set; notifications will fail");
    }

    // Build adapters
    let source = build_rate_source(&config.provider)?;
    let notifier = SlackNotifier::new(
        config.slack_webhook_url.clone(),
        build_client(config.provider.timeout)?,
    );

    // Create the rate checker
    let checker = RateChecker::new(source, notifier);

    // Create and run the HTTP server
    let server = HttpServer::new(checker, config.base_currency, config.target_currency)
        .with_rate_limit(config.rate_limit_per_minute);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}
