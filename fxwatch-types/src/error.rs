//! Error types for the rate checker.

use chrono::NaiveDate;

/// Rate source errors (fetching a quote from a provider).
///
/// Only [`RateError::NotFound`] is ever branched on: a direct-quote provider
/// treats it as "date not served" and retries against its latest endpoint.
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("Transport error calling {url}: {message}")]
    Transport { url: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("HTTP error {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Rate for {currency} not found in response")]
    MissingRate { currency: String },

    #[error("Invalid rate {value} for {base}/{target}")]
    InvalidRate {
        base: String,
        target: String,
        value: f64,
    },
}

impl RateError {
    /// Returns true when the provider reported the requested data as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RateError::NotFound(_))
    }
}

/// Notifier errors (delivering an alert).
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Webhook rejected message: HTTP {status}")]
    Rejected { status: u16 },
}

/// Rate check errors. Each variant names the step that failed.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("Failed to fetch today's rate ({date}): {source}")]
    TodayFetch {
        date: NaiveDate,
        #[source]
        source: RateError,
    },

    #[error("Failed to fetch yesterday's rate ({date}): {source}")]
    YesterdayFetch {
        date: NaiveDate,
        #[source]
        source: RateError,
    },

    #[error("Failed to send notification: {0}")]
    Notification(#[source] NotifyError),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CheckError> for AppError {
    fn from(err: CheckError) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_not_found_is_not_found() {
        assert!(RateError::NotFound("404 Not Found".into()).is_not_found());
        assert!(
            !RateError::Status {
                status: 500,
                url: "http://x".into()
            }
            .is_not_found()
        );
        assert!(
            !RateError::MissingRate {
                currency: "JPY".into()
            }
            .is_not_found()
        );
    }

    #[test]
    fn test_check_error_names_step() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let err = CheckError::YesterdayFetch {
            date,
            source: RateError::MissingRate {
                currency: "CAD".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("yesterday"));
        assert!(msg.contains("2025-03-14"));
        assert!(msg.contains("CAD"));
    }

    #[test]
    fn test_check_error_maps_to_internal() {
        let err = CheckError::Notification(NotifyError::Rejected { status: 403 });
        let app: AppError = err.into();
        assert!(matches!(app, AppError::Internal(msg) if msg.contains("notification")));
    }
}
