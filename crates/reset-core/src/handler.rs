//! The leaderboard reset handler.

use constant_time_eq::constant_time_eq;
use http::Method;
use reset_config::{DatabaseConfig, ResetConfig};
use tracing::{error, info, warn};

use crate::store::StoreConnector;
use crate::{ResetBody, ResetRequest, ResetResponse, StoreError};

pub const LEADERBOARD_TABLE: &str = "leaderboard";
pub const LEADERBOARD_KEY_COLUMN: &str = "id";

/// Authorizes the caller and wipes the leaderboard table.
///
/// The steps run in a fixed order: method, body, secret, database config,
/// delete. A caller without the secret never learns whether the database is
/// configured. Every failure becomes a response; nothing is returned as `Err`.
pub async fn handle_reset(
    request: &ResetRequest,
    config: &ResetConfig,
    connector: &dyn StoreConnector,
) -> ResetResponse {
    if request.method != Method::POST {
        return ResetResponse::method_not_allowed();
    }

    let body = ResetBody::parse(request.body.as_deref());

    let Some(expected) = config.secret() else {
        warn!("Reset rejected: no reset secret configured");
        return ResetResponse::unauthorized();
    };
    if !secret_matches(body.secret.as_deref(), expected) {
        warn!("Reset rejected: invalid secret");
        return ResetResponse::unauthorized();
    }

    let Some(database) = config.database() else {
        warn!("Reset aborted: database URL or service role key missing");
        return ResetResponse::not_configured();
    };

    match reset_leaderboard(connector, &database).await {
        Ok(()) => {
            info!("Leaderboard reset: {}", LEADERBOARD_TABLE);
            ResetResponse::reset()
        }
        Err(e) => {
            error!("Reset error: {:?}", e);
            ResetResponse::failed(e.to_string())
        }
    }
}

async fn reset_leaderboard(
    connector: &dyn StoreConnector,
    database: &DatabaseConfig,
) -> Result<(), StoreError> {
    let store = connector.connect(database)?;
    store.delete_all(LEADERBOARD_TABLE, LEADERBOARD_KEY_COLUMN).await
}

fn secret_matches(provided: Option<&str>, expected: &str) -> bool {
    provided.is_some_and(|p| constant_time_eq(p.as_bytes(), expected.as_bytes()))
}
