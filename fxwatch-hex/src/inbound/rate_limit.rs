//! Rate limiting middleware using Governor.
//!
//! Every `/check-rate` call costs two upstream requests, so checks are
//! throttled per currency pair to keep inside the provider's quota.

use axum::{
    Json,
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde_json::json;
use std::{num::NonZeroU32, sync::Arc};

use fxwatch_types::{CheckRateQuery, CurrencyCode};

/// Shared bucket for requests whose currencies do not parse.
const INVALID_KEY: &str = "invalid";

/// Rate limiter state shared across requests.
pub struct RateLimiterState {
    /// Per-pair rate limiters
    limiters: DashMap<String, Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>>,
    /// Quota applied to each pair
    quota: Quota,
    default_base: CurrencyCode,
    default_target: CurrencyCode,
}

impl RateLimiterState {
    /// Creates a limiter allowing `requests_per_minute` checks for each pair.
    /// Zero is treated as one. Omitted currencies resolve to the default pair,
    /// the same way the handler resolves them.
    pub fn new(
        requests_per_minute: u32,
        default_base: CurrencyCode,
        default_target: CurrencyCode,
    ) -> Self {
        let quota =
            Quota::per_minute(NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN));

        Self {
            limiters: DashMap::new(),
            quota,
            default_base,
            default_target,
        }
    }

    /// Checks if a request should be rate limited.
    /// Returns true if the request is allowed, false if rate limited.
    pub fn check(&self, key: &str) -> bool {
        let limiter = self
            .limiters
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(RateLimiter::direct(self.quota)));

        limiter.check().is_ok()
    }

    /// Limiter key for a check request: the resolved `BASE/TARGET` pair, or
    /// the shared invalid slot when either code does not parse.
    pub(crate) fn key_for(&self, query: &CheckRateQuery) -> String {
        let resolve = |value: &Option<String>, default: &CurrencyCode| {
            match value.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                None => Some(default.clone()),
                Some(raw) => raw.parse::<CurrencyCode>().ok(),
            }
        };

        match (
            resolve(&query.base, &self.default_base),
            resolve(&query.target, &self.default_target),
        ) {
            (Some(base), Some(target)) => format!("{}/{}", base, target),
            _ => INVALID_KEY.to_string(),
        }
    }
}

/// Rate limiting middleware for `/check-rate`.
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiterState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.uri().path() != "/check-rate" {
        return next.run(request).await;
    }

    let key = Query::<CheckRateQuery>::try_from_uri(request.uri())
        .map(|Query(q)| limiter.key_for(&q))
        .unwrap_or_else(|_| INVALID_KEY.to_string());

    if !limiter.check(&key) {
        tracing::warn!("Rate limit exceeded for {}", key);
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "status": "error",
                "message": "Rate limit exceeded. Please try again later.",
                "data": null,
                "retry_after_seconds": 60
            })),
        )
            .into_response();
    }

    next.run(request).await
}
