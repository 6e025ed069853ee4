//! Axum response conversion for handler results.

use axum::response::{IntoResponse, Response};
use axum::Json;
use reset_core::ResetResponse;

/// Wraps a [`ResetResponse`] so it can be returned from an axum handler.
#[derive(Debug)]
pub struct ResetReply(pub ResetResponse);

impl IntoResponse for ResetReply {
    fn into_response(self) -> Response {
        let ResetResponse {
            status,
            headers,
            body,
        } = self.0;
        (status, headers, Json(body)).into_response()
    }
}
