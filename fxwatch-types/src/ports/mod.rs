//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod notifier;
mod rate_source;

pub use notifier::Notifier;
pub use rate_source::RateSource;
