//! Record store for Literature Explorer
//!
//! Provides:
//! - SeaORM entity model for the `papers` table
//! - Repository with load / upsert / lookup operations
//! - Scoped connections: every store call opens its own connection and
//!   releases it before returning

pub mod models;
mod repository;

pub use repository::{join_list, split_list, PaperRepository};

#[cfg(test)]
pub(crate) use repository::testing;

use crate::config::DatabaseConfig;
use crate::errors::{AppError, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{debug, warn};

/// Opens short-lived connections to the record store
#[derive(Debug, Clone)]
pub struct DbConnector {
    url: String,
    connect_timeout: Duration,
}

impl DbConnector {
    /// Create a connector from configuration
    pub fn new(config: &DatabaseConfig) -> Self {
        Self {
            url: config.url.clone(),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
        }
    }

    /// Database URL this connector targets
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Open a single-connection handle.
    ///
    /// Failure to open the storage maps to `StoreUnavailable`.
    pub async fn connect(&self) -> Result<DatabaseConnection> {
        let mut opts = ConnectOptions::new(&self.url);
        opts.max_connections(1)
            .min_connections(1)
            .connect_timeout(self.connect_timeout)
            .sqlx_logging(false);

        Database::connect(opts)
            .await
            .map_err(|e| AppError::StoreUnavailable {
                message: format!("Failed to open {}: {}", self.url, e),
            })
    }

    /// Close a handle obtained from `connect`
    pub async fn release(&self, conn: DatabaseConnection) {
        if let Err(e) = conn.close().await {
            warn!(error = %e, "Failed to close store connection");
        } else {
            debug!("Store connection closed");
        }
    }
}
