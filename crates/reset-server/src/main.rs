use std::sync::Arc;

use anyhow::Result;
use reset_config::{ConfigSource, ResetConfig, ServerConfig, RESET_SECRET_VAR};
use reset_server::telemetry::{init_tracing, LogFormat};
use reset_server::{create_app, ServerState, RESET_ROUTE};
use reset_supabase::SupabaseConnector;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(LogFormat::Compact);

    let server_config = ServerConfig::from_env()?;

    // Configuration is re-read per request; this only flags obvious gaps early.
    let startup = ResetConfig::from_env();
    if startup.secret().is_none() {
        warn!("{} not configured: every reset will be rejected", RESET_SECRET_VAR);
    }
    if startup.database().is_none() {
        warn!("Supabase URL or service role key not configured");
    }

    let state = Arc::new(ServerState::new(
        ConfigSource::Env,
        Arc::new(SupabaseConnector::default()),
    ));
    let app = create_app(state);

    info!("Starting server on {} ({})", server_config.bind_addr, RESET_ROUTE);

    let listener = tokio::net::TcpListener::bind(server_config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
