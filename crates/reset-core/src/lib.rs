//! Core types and the reset handler for the leaderboard reset function.
//!
//! The crate has no knowledge of any hosting platform:
//!
//! - [`handle_reset`]: Turns a [`ResetRequest`] into a [`ResetResponse`]
//! - [`LeaderboardStore`] and [`StoreConnector`]: The database seam
//! - [`StoreError`]: Failures reported by a store
//!
//! # Example
//!
//! ```rust
//! use http::Method;
//! use reset_core::{ResetRequest, ResetResponse};
//!
//! let request = ResetRequest::new(Method::POST, Some(br#"{"secret":"s3cret"}"#.to_vec()));
//! assert_eq!(request.method, Method::POST);
//!
//! let response = ResetResponse::unauthorized();
//! assert_eq!(response.status.as_u16(), 401);
//! ```

mod handler;
mod store;

pub use handler::{handle_reset, LEADERBOARD_KEY_COLUMN, LEADERBOARD_TABLE};
pub use store::{LeaderboardStore, StoreConnector};

use http::header::{HeaderValue, ALLOW};
use http::{HeaderMap, Method, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported while talking to the leaderboard database.
///
/// `Display` yields the bare message, which is what callers see in `details`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The configured database URL could not be used.
    #[error("Invalid database URL: {0}")]
    InvalidUrl(String),

    /// The request never produced a response.
    #[error("{0}")]
    Request(String),

    /// The database answered with an error.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

/// An inbound invocation, stripped of any platform envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetRequest {
    pub method: Method,
    pub body: Option<Vec<u8>>,
}

impl ResetRequest {
    pub fn new(method: Method, body: Option<Vec<u8>>) -> Self {
        Self { method, body }
    }
}

/// JSON payload accepted from the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ResetBody {
    #[serde(default)]
    pub secret: Option<String>,
}

impl ResetBody {
    /// Parses the raw body. Anything that is not a JSON object with an optional
    /// string `secret` yields the empty body.
    pub fn parse(raw: Option<&[u8]>) -> Self {
        raw.and_then(|bytes| serde_json::from_slice(bytes).ok())
            .unwrap_or_default()
    }
}

/// JSON payload returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An outbound response, ready for an adapter to wrap.
#[derive(Debug, Clone)]
pub struct ResetResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl ResetResponse {
    fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: ResponseBody {
                message: message.to_string(),
                details: None,
            },
        }
    }

    pub fn method_not_allowed() -> Self {
        let mut response = Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
        response
            .headers
            .insert(ALLOW, HeaderValue::from_static("POST"));
        response
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn not_configured() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Server not configured")
    }

    pub fn reset() -> Self {
        Self::new(StatusCode::OK, "Leaderboard reset")
    }

    pub fn failed(details: impl Into<String>) -> Self {
        let mut response = Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Reset failed");
        response.body.details = Some(details.into());
        response
    }

    /// Serializes the body to its JSON wire form.
    pub fn body_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.body)
    }
}
