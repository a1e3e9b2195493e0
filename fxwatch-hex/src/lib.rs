//! # fxwatch Hex
//!
//! Application service layer and HTTP adapter for the rate checker.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates the rate comparison)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `S: RateSource` and `N: Notifier`, allowing
//! different provider and notification adapters to be injected.

pub mod inbound;
mod openapi;
pub mod service;


pub use openapi::ApiDoc;
pub use service::RateChecker;
