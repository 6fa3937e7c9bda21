//! Idempotent bulk insert of resolved grants

use anyhow::{Context, Result};
use sqlx::{Any, Transaction};

use super::types::{ResolvedGrant, WriteOutcome};

/// One statement per grant: the existence check and the insert collapse
/// into a single round trip. The store itself is the idempotency record;
/// nothing is cached in memory, so a re-run after a crash needs no extra
/// bookkeeping.
const INSERT_SQL: &str = "INSERT INTO customer_permissions (user_id, role_id, customer_id, created_at) \
     SELECT ?, ?, ?, CURRENT_TIMESTAMP \
     WHERE NOT EXISTS ( \
         SELECT 1 FROM customer_permissions \
         WHERE user_id = ? AND role_id = ? AND customer_id = ? \
     )";

/// Write grants on the open transaction, skipping tuples already
/// present. Returns how many rows were inserted vs already there.
pub async fn write_grants(
    tx: &mut Transaction<'_, Any>,
    grants: &[ResolvedGrant],
) -> Result<WriteOutcome> {
    let mut outcome = WriteOutcome::default();

    for grant in grants {
        let result = sqlx::query(INSERT_SQL)
            .bind(grant.user_id)
            .bind(grant.role_id)
            .bind(grant.customer_id)
            .bind(grant.user_id)
            .bind(grant.role_id)
            .bind(grant.customer_id)
            .execute(&mut **tx)
            .await
            .with_context(|| format!("Failed to insert grant from row {}", grant.row))?;

        if result.rows_affected() > 0 {
            log::debug!(
                "Row {}: inserted grant ({}, {}, {})",
                grant.row,
                grant.user_id,
                grant.role_id,
                grant.customer_id
            );
            outcome.inserted += 1;
        } else {
            log::debug!("Row {}: grant already present, skipped", grant.row);
            outcome.skipped += 1;
        }
    }

    Ok(outcome)
}
