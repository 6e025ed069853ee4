//! Leaderboard reset HTTP handler.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::Method;
use reset_core::{handle_reset, ResetRequest};

use crate::response::ResetReply;
use crate::ServerState;

/// ANY /api/reset-leaderboard - Wipe the leaderboard if the secret matches.
pub async fn reset(
    State(state): State<Arc<ServerState>>,
    method: Method,
    body: Bytes,
) -> ResetReply {
    let body = (!body.is_empty()).then(|| body.to_vec());
    let request = ResetRequest::new(method, body);
    let config = state.config.load();

    ResetReply(handle_reset(&request, &config, state.connector.as_ref()).await)
}
