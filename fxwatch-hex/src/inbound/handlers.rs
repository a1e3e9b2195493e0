//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use fxwatch_types::{
    ApiResponse, AppError, CheckRateQuery, CurrencyCode, Notifier, RateChange, RateCheckData,
    RateSource,
};

use crate::RateChecker;

/// Application state shared across handlers.
pub struct AppState<S: RateSource, N: Notifier> {
    pub checker: RateChecker<S, N>,
    /// Pair used when the request omits `base` or `target`.
    pub default_base: CurrencyCode,
    pub default_target: CurrencyCode,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Parses the boolean spellings accepted by the `notification` flag.
pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

fn currency_or_default(
    raw: Option<&str>,
    default: &CurrencyCode,
    field: &str,
) -> Result<CurrencyCode, AppError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(default.clone()),
        Some(s) => s
            .parse()
            .map_err(|e| AppError::BadRequest(format!("{}: {}", field, e))),
    }
}

/// Compare today's rate with yesterday's and notify when the target strengthened.
#[tracing::instrument(skip(state))]
pub async fn check_rate<S: RateSource, N: Notifier>(
    State(state): State<Arc<AppState<S, N>>>,
    Query(query): Query<CheckRateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let base = currency_or_default(query.base.as_deref(), &state.default_base, "base")?;
    let target = currency_or_default(query.target.as_deref(), &state.default_target, "target")?;

    let force_notify = match query.notification.as_deref().filter(|s| !s.is_empty()) {
        None => false,
        Some(raw) => parse_bool(raw).ok_or_else(|| {
            AppError::BadRequest("notification must be a boolean (true/false)".into())
        })?,
    };

    let result = state
        .checker
        .check_rates(&base, &target, force_notify)
        .await
        .map_err(|e| {
            tracing::error!("Rate check failed: {}", e);
            AppError::from(e)
        })?;

    let change = RateChange::between(result.today_rate, result.yesterday_rate).describe(&target);

    Ok(Json(ApiResponse::success(
        "Rate check executed successfully",
        RateCheckData {
            base,
            target,
            today_rate: result.today_rate,
            yesterday_rate: result.yesterday_rate,
            change,
            is_notified: result.is_notified,
        },
    )))
}
