//! HTTP route handlers.

pub mod reset;

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
