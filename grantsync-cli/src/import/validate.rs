//! Failure-policy application
//!
//! Both policies run through this single function; the policy is a
//! run-time value, not a separate pipeline.

use super::error::ImportError;
use super::types::{FailurePolicy, ResolvedGrant, UnresolvedReference};

/// Apply the configured failure policy to the resolution outcome.
///
/// Tolerant logs each unresolved row and passes the resolved set
/// through. Strict aborts the whole batch with every failing row
/// attached, before any transaction is opened.
pub fn apply_policy(
    policy: FailurePolicy,
    resolved: Vec<ResolvedGrant>,
    unresolved: Vec<UnresolvedReference>,
) -> Result<Vec<ResolvedGrant>, ImportError> {
    if unresolved.is_empty() {
        return Ok(resolved);
    }

    match policy {
        FailurePolicy::Tolerant => {
            for miss in &unresolved {
                log::error!(
                    "Row {}: skipping, unknown {} '{}'",
                    miss.row,
                    miss.field,
                    miss.value
                );
            }
            Ok(resolved)
        }
        FailurePolicy::Strict => Err(ImportError::UnresolvedReferences(unresolved)),
    }
}
