//! Netlify Functions envelope around the reset handler.
//!
//! Netlify invokes functions with an AWS Lambda proxy event and expects a
//! `{ statusCode, headers, body }` object back.

use std::collections::BTreeMap;

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reset_config::ResetConfig;
use reset_core::{handle_reset, ResetRequest, ResetResponse, StoreConnector};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The parts of a Netlify function event the handler reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetlifyEvent {
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl NetlifyEvent {
    /// Decoded request body. A body that fails to decode counts as absent.
    fn decoded_body(&self) -> Option<Vec<u8>> {
        let body = self.body.as_deref()?;
        if !self.is_base64_encoded {
            return Some(body.as_bytes().to_vec());
        }
        match STANDARD.decode(body) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                debug!("Discarding undecodable base64 body: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetlifyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl NetlifyResponse {
    pub fn from_reset(response: &ResetResponse) -> Result<Self, serde_json::Error> {
        let mut headers: BTreeMap<String, String> = response
            .headers
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_string(), value.to_string()))
            })
            .collect();
        headers.insert(CONTENT_TYPE.as_str().to_string(), "application/json".to_string());

        Ok(Self {
            status_code: response.status.as_u16(),
            headers,
            body: response.body_json()?,
        })
    }
}

/// Runs one Netlify invocation through the reset handler.
pub async fn handle_event(
    event: NetlifyEvent,
    config: &ResetConfig,
    connector: &dyn StoreConnector,
) -> Result<NetlifyResponse, serde_json::Error> {
    let Ok(method) = Method::from_bytes(event.http_method.as_bytes()) else {
        return NetlifyResponse::from_reset(&ResetResponse::method_not_allowed());
    };

    let request = ResetRequest::new(method, event.decoded_body());
    let response = handle_reset(&request, config, connector).await;
    NetlifyResponse::from_reset(&response)
}
