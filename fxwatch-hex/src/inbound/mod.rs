//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod handlers;
mod rate_limit;
mod server;

pub use handlers::AppState;
pub use rate_limit::RateLimiterState;
pub use server::HttpServer;
