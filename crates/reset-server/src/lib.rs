//! Hosting adapters for the leaderboard reset function.
//!
//! [`create_app`] exposes the handler as a plain HTTP endpoint in the shape a
//! Vercel-style `api/` function has. [`netlify`] wraps the same handler in the
//! Netlify Functions (AWS Lambda) event envelope.

pub mod handlers;
pub mod netlify;
pub mod response;
pub mod telemetry;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::routing::{any, get};
use axum::Router;
use reset_config::ConfigSource;
use reset_core::StoreConnector;
use tower_http::trace::TraceLayer;
use tracing::info;

pub const RESET_ROUTE: &str = "/api/reset-leaderboard";

pub struct ServerState {
    pub config: ConfigSource,
    pub connector: Arc<dyn StoreConnector>,
}

impl ServerState {
    pub fn new(config: ConfigSource, connector: Arc<dyn StoreConnector>) -> Self {
        Self { config, connector }
    }
}

/// Builds the router. Every method reaches the reset handler so it can answer
/// non-POST requests with its own 405 body.
pub fn create_app(state: Arc<ServerState>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    let logged_routes = Router::new()
        .route(RESET_ROUTE, any(handlers::reset::reset))
        .layer(trace_layer);

    Router::new()
        .merge(logged_routes)
        .route("/health", get(handlers::health))
        .with_state(state)
}
