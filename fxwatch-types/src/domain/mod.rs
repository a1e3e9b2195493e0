//! Domain models for the rate checker.

pub mod currency;
pub mod rate;

pub use currency::CurrencyCode;
pub use rate::{Rate, RateChange};
