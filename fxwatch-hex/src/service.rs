//! Rate Check Application Service
//!
//! Orchestrates the day-over-day comparison through the rate source and
//! notifier ports. Contains NO infrastructure logic - pure business orchestration.

use chrono::{Days, NaiveDate, Utc};
use tracing::{info, instrument};

use fxwatch_types::{
    CheckError, CheckRateResult, CurrencyCode, Notifier, Rate, RateChange, RateSource,
};

/// Application service for the rate check.
///
/// Generic over `S: RateSource` and `N: Notifier` - adapters are injected at
/// compile time, which keeps tests free of HTTP.
pub struct RateChecker<S: RateSource, N: Notifier> {
    source: S,
    notifier: N,
}

impl<S: RateSource, N: Notifier> RateChecker<S, N> {
    /// Creates a new checker from a rate source and a notifier.
    pub fn new(source: S, notifier: N) -> Self {
        Self { source, notifier }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Compares today's rate with yesterday's, using the current UTC date.
    pub async fn check_rates(
        &self,
        base: &CurrencyCode,
        target: &CurrencyCode,
        force_notify: bool,
    ) -> Result<CheckRateResult, CheckError> {
        let today = Utc::now().date_naive();
        self.check_rates_on(today, base, target, force_notify).await
    }

    /// Compares the rate on `today` with the rate on the day before.
    ///
    /// A notification goes out when the base/target price fell (the target
    /// currency strengthened) or when `force_notify` is set. Any fetch failure
    /// aborts before a notification is attempted.
    #[instrument(skip(self), fields(base = %base, target = %target))]
    pub async fn check_rates_on(
        &self,
        today: NaiveDate,
        base: &CurrencyCode,
        target: &CurrencyCode,
        force_notify: bool,
    ) -> Result<CheckRateResult, CheckError> {
        let yesterday = today - Days::new(1);

        let today_rate = self
            .source
            .fetch_rate(today, base, target)
            .await
            .map_err(|source| CheckError::TodayFetch {
                date: today,
                source,
            })?;
        let yesterday_rate = self
            .source
            .fetch_rate(yesterday, base, target)
            .await
            .map_err(|source| CheckError::YesterdayFetch {
                date: yesterday,
                source,
            })?;

        let change = RateChange::between(today_rate.value(), yesterday_rate.value());
        info!(
            today = today_rate.value(),
            yesterday = yesterday_rate.value(),
            "{}/{} {}",
            base,
            target,
            change.describe(target)
        );

        let result = CheckRateResult {
            today_rate: today_rate.value(),
            yesterday_rate: yesterday_rate.value(),
            is_notified: false,
        };

        let strengthened = change == RateChange::Down;
        if !strengthened && !force_notify {
            return Ok(result);
        }

        let message = if strengthened {
            alert_message(&today_rate, &yesterday_rate)
        } else {
            forced_message(&today_rate, &yesterday_rate)
        };

        self.notifier
            .notify(&message)
            .await
            .map_err(CheckError::Notification)?;

        info!(forced = !strengthened, "Notification sent");
        Ok(CheckRateResult {
            is_notified: true,
            ..result
        })
    }
}

/// Wording for a genuine strengthening of the target currency.
pub fn alert_message(today: &Rate, yesterday: &Rate) -> String {
    format!(
        "📈 {}/{} alert: {} strengthened. Yesterday ({}): {:.4} -> Today ({}): {:.4}",
        today.base(),
        today.target(),
        today.target(),
        yesterday.date(),
        yesterday.value(),
        today.date(),
        today.value(),
    )
}

/// Wording for a manual verification ping with no strengthening behind it.
pub fn forced_message(today: &Rate, yesterday: &Rate) -> String {
    format!(
        "🔔 [TEST] {}/{} forced notification, no strengthening detected. Yesterday ({}): {:.4} -> Today ({}): {:.4}",
        today.base(),
        today.target(),
        yesterday.date(),
        yesterday.value(),
        today.date(),
        today.value(),
    )
}
