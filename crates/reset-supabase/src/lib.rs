//! Supabase PostgREST client with service-role authentication.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use reset_config::DatabaseConfig;
use reset_core::{LeaderboardStore, StoreConnector, StoreError};
use serde::Deserialize;
use tracing::debug;

const REST_PATH: &str = "rest/v1/";

/// Error body returned by PostgREST.
#[derive(Deserialize)]
struct PostgrestError {
    message: Option<String>,
    code: Option<String>,
}

/// Client for one Supabase project, authenticated with the service-role key.
pub struct SupabaseClient {
    http: Client,
    rest_url: Url,
    service_role_key: String,
}

impl SupabaseClient {
    /// Creates a client for the project at `database.url`.
    pub fn new(http: Client, database: &DatabaseConfig) -> Result<Self, StoreError> {
        let base = format!("{}/{}", database.url.trim_end_matches('/'), REST_PATH);
        let rest_url = Url::parse(&base).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        if !matches!(rest_url.scheme(), "http" | "https") {
            return Err(StoreError::InvalidUrl(format!(
                "unsupported scheme: {}",
                rest_url.scheme()
            )));
        }

        Ok(Self {
            http,
            rest_url,
            service_role_key: database.service_role_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.rest_url
            .join(table)
            .map_err(|e| StoreError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl LeaderboardStore for SupabaseClient {
    async fn delete_all(&self, table: &str, key_column: &str) -> Result<(), StoreError> {
        let mut url = self.table_url(table)?;
        url.query_pairs_mut().append_pair(key_column, "not.is.null");
        debug!("DELETE {}", url);

        let response = self
            .http
            .delete(url)
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
            .header("Prefer", "return=minimal")
            .send()
            .await
            .map_err(|e| StoreError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &body))
    }
}

fn api_error(status: StatusCode, body: &str) -> StoreError {
    let parsed = serde_json::from_str::<PostgrestError>(body).ok();
    let code = parsed.as_ref().and_then(|p| p.code.clone());
    let message = parsed
        .and_then(|p| p.message)
        .or_else(|| Some(body.trim().to_string()).filter(|b| !b.is_empty()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    StoreError::Api {
        status: status.as_u16(),
        code,
        message,
    }
}

/// Hands out a new [`SupabaseClient`] per invocation over a shared connection pool.
#[derive(Clone, Default)]
pub struct SupabaseConnector {
    http: Client,
}

impl SupabaseConnector {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

impl StoreConnector for SupabaseConnector {
    fn connect(&self, database: &DatabaseConfig) -> Result<Box<dyn LeaderboardStore>, StoreError> {
        Ok(Box::new(SupabaseClient::new(self.http.clone(), database)?))
    }
}
