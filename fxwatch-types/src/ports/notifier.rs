//! Alert delivery port.

use crate::error::NotifyError;

/// Port trait for alert channels (chat webhooks etc.).
///
/// One call, one delivery attempt. Implementations must not retry and must
/// surface every failure.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync + 'static {
    async fn notify(&self, message: &str) -> Result<(), NotifyError>;
}
