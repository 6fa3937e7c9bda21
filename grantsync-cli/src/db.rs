//! Database pool construction

use anyhow::{Context, Result};
use sqlx::AnyPool;
use sqlx::any::{AnyPoolOptions, install_default_drivers};

use crate::config::DatabaseConfig;

/// Connect to the configured database.
///
/// An import run is one sequential batch, so the pool holds a single
/// connection.
pub async fn connect(config: &DatabaseConfig) -> Result<AnyPool> {
    install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .connect(&config.url())
        .await
        .with_context(|| format!("Failed to connect to {} database", config.engine))?;

    Ok(pool)
}
