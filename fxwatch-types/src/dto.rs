//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::CurrencyCode;

// ─────────────────────────────────────────────────────────────────────────────
// Rate check result
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of one day-over-day rate check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CheckRateResult {
    pub today_rate: f64,
    pub yesterday_rate: f64,
    /// True only when a notification was actually delivered.
    pub is_notified: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Query string for `GET /check-rate`.
///
/// Values are kept raw so the handler can report precise validation errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CheckRateQuery {
    /// Base currency; defaults to the configured base
    #[param(example = "CAD")]
    pub base: Option<String>,
    /// Target currency; defaults to the configured target
    #[param(example = "JPY")]
    pub target: Option<String>,
    /// Force a notification regardless of the comparison outcome
    #[param(example = "false")]
    pub notification: Option<String>,
}

/// Rate check payload returned on success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RateCheckData {
    pub base: CurrencyCode,
    pub target: CurrencyCode,
    #[schema(example = 106.67)]
    pub today_rate: f64,
    #[schema(example = 107.12)]
    pub yesterday_rate: f64,
    /// Direction of the move, e.g. "down (JPY stronger)"
    #[schema(example = "down (JPY stronger)")]
    pub change: String,
    pub is_notified: bool,
}

/// Envelope used by every `/check-rate` response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// "success" or "error"
    #[schema(example = "success")]
    pub status: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success".into(),
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".into(),
            message: message.into(),
            data: None,
        }
    }
}
