//! Import run orchestration and the transaction boundary

use std::path::Path;

use anyhow::{Context, Result};
use sqlx::{Any, AnyPool, Transaction};

use super::error::ImportError;
use super::excel::read_grant_rows;
use super::lookup::LookupIndex;
use super::resolver::resolve_rows;
use super::types::{FailurePolicy, ImportReport};
use super::validate::apply_policy;
use super::writer::write_grants;

/// Run one complete import: load, resolve, validate, write, commit.
///
/// The transaction opens only after validation succeeds and brackets
/// exactly the write and the commit; source load and lookup build run on
/// the pool with no transaction held. Written grants are durable only
/// once the commit returns.
pub async fn run_import(
    pool: &AnyPool,
    excel_path: &Path,
    policy: FailurePolicy,
) -> Result<ImportReport> {
    let rows = read_grant_rows(excel_path)?;

    if rows.is_empty() {
        log::warn!("No data found in workbook. Nothing to import.");
        return Ok(ImportReport::default());
    }

    let lookups = LookupIndex::build(pool).await?;

    let (resolved, unresolved) = resolve_rows(&rows, &lookups);
    log::info!("Resolved {} of {} rows", resolved.len(), rows.len());

    let unresolved_count = unresolved.len();
    let grants = apply_policy(policy, resolved, unresolved)?;

    if grants.is_empty() {
        log::warn!("No resolvable rows to write.");
        return Ok(ImportReport {
            total_rows: rows.len(),
            unresolved: unresolved_count,
            ..ImportReport::default()
        });
    }

    let mut tx = pool.begin().await.context("Failed to begin transaction")?;

    let outcome = match write_grants(&mut tx, &grants).await {
        Ok(outcome) => outcome,
        Err(e) => return Err(roll_back(tx, e).await.into()),
    };

    match tx.commit().await {
        Ok(()) => log::info!("Transaction committed"),
        // A failed commit consumes the transaction; the driver discards it.
        Err(e) => {
            return Err(ImportError::Write(
                anyhow::Error::new(e).context("Failed to commit transaction"),
            )
            .into());
        }
    }

    log::info!(
        "Import finished: {} inserted, {} already present, {} unresolved",
        outcome.inserted,
        outcome.skipped,
        unresolved_count
    );

    Ok(ImportReport {
        total_rows: rows.len(),
        resolved: grants.len(),
        unresolved: unresolved_count,
        inserted: outcome.inserted,
        skipped: outcome.skipped,
    })
}

/// The single rollback path for write failures: log, roll back, keep the
/// original error. A rollback failure is logged but never masks the
/// error that triggered it.
async fn roll_back(tx: Transaction<'_, Any>, original: anyhow::Error) -> ImportError {
    log::error!("Write failed, rolling back: {:#}", original);

    match tx.rollback().await {
        Ok(()) => log::info!("Transaction rolled back"),
        Err(e) => log::error!("Rollback failed: {}", e),
    }

    ImportError::Write(original)
}
