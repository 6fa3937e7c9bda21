//! Resolution of grant rows against the lookup index
//!
//! Pure functions of the row and the lookup snapshot; no store access.

use super::lookup::LookupIndex;
use super::types::{GrantRow, ReferenceField, ResolvedGrant, UnresolvedReference};

/// Resolve one row. Fields are checked in declaration order (email,
/// role, customer); the first miss is reported.
pub fn resolve_row(
    row: &GrantRow,
    lookups: &LookupIndex,
) -> Result<ResolvedGrant, UnresolvedReference> {
    let user_id = *lookups
        .users
        .get(&row.email)
        .ok_or_else(|| miss(row, ReferenceField::Email, &row.email))?;
    let role_id = *lookups
        .roles
        .get(&row.role_name)
        .ok_or_else(|| miss(row, ReferenceField::RoleName, &row.role_name))?;
    let customer_id = *lookups
        .customers
        .get(&row.customer_name)
        .ok_or_else(|| miss(row, ReferenceField::CustomerName, &row.customer_name))?;

    Ok(ResolvedGrant {
        row: row.row,
        user_id,
        role_id,
        customer_id,
    })
}

fn miss(row: &GrantRow, field: ReferenceField, value: &str) -> UnresolvedReference {
    UnresolvedReference {
        row: row.row,
        field,
        value: value.to_string(),
    }
}

/// Resolve every row, partitioning hits from misses
pub fn resolve_rows(
    rows: &[GrantRow],
    lookups: &LookupIndex,
) -> (Vec<ResolvedGrant>, Vec<UnresolvedReference>) {
    let mut resolved = Vec::with_capacity(rows.len());
    let mut unresolved = Vec::new();

    for row in rows {
        match resolve_row(row, lookups) {
            Ok(grant) => resolved.push(grant),
            Err(failure) => unresolved.push(failure),
        }
    }

    (resolved, unresolved)
}
