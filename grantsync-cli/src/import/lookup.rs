//! Bulk natural-key lookup maps for the reference entities

use std::collections::HashMap;

use anyhow::{Context, Result};
use sqlx::AnyPool;

/// Natural-key → id maps, one per reference entity.
///
/// Each map is populated by a single bulk query, never one query per
/// input row, and is read-only for the rest of the run. Duplicate
/// natural keys in a reference table resolve to the last row seen; that
/// ambiguity is inherited from the source data, not resolved here.
#[derive(Debug, Default)]
pub struct LookupIndex {
    pub users: HashMap<String, i64>,
    pub roles: HashMap<String, i64>,
    pub customers: HashMap<String, i64>,
}

impl LookupIndex {
    /// Load all three reference tables
    pub async fn build(pool: &AnyPool) -> Result<Self> {
        let users = fetch_lookup_map(pool, "SELECT email, id FROM users")
            .await
            .context("Failed to load user lookup")?;
        let roles = fetch_lookup_map(pool, "SELECT name, id FROM roles")
            .await
            .context("Failed to load role lookup")?;
        let customers = fetch_lookup_map(pool, "SELECT name, id FROM customers")
            .await
            .context("Failed to load customer lookup")?;

        log::info!(
            "Loaded lookups: {} users, {} roles, {} customers",
            users.len(),
            roles.len(),
            customers.len()
        );

        Ok(LookupIndex {
            users,
            roles,
            customers,
        })
    }
}

/// Run a two-column lookup query and fold it into a map (last row wins
/// on duplicate keys)
async fn fetch_lookup_map(pool: &AnyPool, sql: &str) -> Result<HashMap<String, i64>> {
    let rows: Vec<(String, i64)> = sqlx::query_as(sql).fetch_all(pool).await?;
    Ok(rows.into_iter().collect())
}
