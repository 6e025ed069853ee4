//! Database seam used by the reset handler.

use async_trait::async_trait;
use reset_config::DatabaseConfig;

use crate::StoreError;

/// A client bound to one database.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Deletes every row of `table` whose `key_column` is not null.
    async fn delete_all(&self, table: &str, key_column: &str) -> Result<(), StoreError>;
}

/// Builds a fresh [`LeaderboardStore`] for each invocation.
pub trait StoreConnector: Send + Sync {
    fn connect(&self, database: &DatabaseConfig) -> Result<Box<dyn LeaderboardStore>, StoreError>;
}
