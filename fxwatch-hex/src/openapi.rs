//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use fxwatch_types::{ApiResponse, CheckRateQuery, CurrencyCode, RateCheckData};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Compare today's rate with yesterday's
///
/// Sends a notification when the target currency strengthened, or always when
/// `notification=true`.
#[utoipa::path(
    get,
    path = "/check-rate",
    tag = "rates",
    params(CheckRateQuery),
    responses(
        (status = 200, description = "Rate check executed", body = ApiResponse<RateCheckData>),
        (status = 400, description = "Invalid currency code or notification flag", body = inline(serde_json::Value),
            example = json!({"status": "error", "message": "notification must be a boolean (true/false)", "data": null})),
        (status = 429, description = "Too many checks for this pair"),
        (status = 500, description = "Rate fetch or notification failed", body = inline(serde_json::Value),
            example = json!({"status": "error", "message": "Failed to send notification: Webhook rejected message: HTTP 403", "data": null}))
    )
)]
async fn check_rate() {}

/// OpenAPI documentation for the fxwatch API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "fxwatch Rate Check API",
        version = "1.0.0",
        description = "Checks whether a target currency strengthened against a base currency since yesterday and posts an alert to a chat webhook.",
        license(name = "MIT"),
    ),
    paths(health, check_rate),
    components(schemas(ApiResponse<RateCheckData>, RateCheckData, CurrencyCode)),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "rates", description = "Day-over-day rate comparison"),
    )
)]
pub struct ApiDoc;
