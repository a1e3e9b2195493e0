//! # fxwatch Types
//!
//! Domain types and port traits for the exchange-rate watcher.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Rate, CurrencyCode)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Fetch, notification and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{CurrencyCode, Rate, RateChange};
pub use dto::*;
pub use error::{AppError, CheckError, NotifyError, RateError};
pub use ports::{Notifier, RateSource};
