//! Configuration for the leaderboard reset function.
//!
//! Every value comes from the process environment. The handler never reads the
//! environment itself; adapters load a [`ResetConfig`] through a [`ConfigSource`]
//! on each invocation and pass it in.

use std::env;
use std::fmt;
use std::net::SocketAddr;

pub const RESET_SECRET_VAR: &str = "RESET_SECRET";
pub const SUPABASE_URL_VAR: &str = "SUPABASE_URL";
pub const SUPABASE_SERVICE_ROLE_KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

// ─────────────────────────────────────────────────────────────────────────────
// Reset Config
// ─────────────────────────────────────────────────────────────────────────────

/// Per-invocation settings for the reset handler. Empty strings count as unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ResetConfig {
    pub reset_secret: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_service_role_key: Option<String>,
}

impl ResetConfig {
    pub fn from_env() -> Self {
        Self {
            reset_secret: read_var(RESET_SECRET_VAR),
            supabase_url: read_var(SUPABASE_URL_VAR),
            supabase_service_role_key: read_var(SUPABASE_SERVICE_ROLE_KEY_VAR),
        }
    }

    /// The configured shared secret, or `None` when unset or empty.
    pub fn secret(&self) -> Option<&str> {
        non_empty(self.reset_secret.as_deref())
    }

    /// Database connection settings, present only when both URL and key are set.
    pub fn database(&self) -> Option<DatabaseConfig> {
        let url = non_empty(self.supabase_url.as_deref())?;
        let key = non_empty(self.supabase_service_role_key.as_deref())?;
        Some(DatabaseConfig {
            url: url.to_string(),
            service_role_key: key.to_string(),
        })
    }
}

impl fmt::Debug for ResetConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResetConfig")
            .field("reset_secret", &self.reset_secret.as_ref().map(|_| "<redacted>"))
            .field("supabase_url", &self.supabase_url)
            .field(
                "supabase_service_role_key",
                &self.supabase_service_role_key.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Supabase endpoint and service-role key.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub service_role_key: String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url)
            .field("service_role_key", &"<redacted>")
            .finish()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Config Source
// ─────────────────────────────────────────────────────────────────────────────

/// Where an adapter gets its [`ResetConfig`] from on each invocation.
#[derive(Debug, Clone, Default)]
pub enum ConfigSource {
    /// Re-read the process environment every time.
    #[default]
    Env,
    Fixed(ResetConfig),
}

impl ConfigSource {
    pub fn load(&self) -> ResetConfig {
        match self {
            ConfigSource::Env => ResetConfig::from_env(),
            ConfigSource::Fixed(config) => config.clone(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Server Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = read_var(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let bind_addr = raw.parse().map_err(|_| ConfigError::InvalidValue {
            var: BIND_ADDR_VAR,
            value: raw.to_string(),
        })?;
        Ok(Self { bind_addr })
    }
}

fn read_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
