//! Core types for the permission grant import pipeline

use std::fmt;

use clap::ValueEnum;

/// One positionally-aligned input row taken from the workbook.
///
/// `row` is the 1-based position among the aligned data rows (header
/// excluded) and exists for provenance in logs and errors; row content
/// carries no uniqueness invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantRow {
    pub row: usize,
    pub email: String,
    pub role_name: String,
    pub customer_name: String,
}

/// A row whose natural keys all resolved to database ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedGrant {
    pub row: usize,
    pub user_id: i64,
    pub role_id: i64,
    pub customer_id: i64,
}

/// The reference column that failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceField {
    Email,
    RoleName,
    CustomerName,
}

impl fmt::Display for ReferenceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReferenceField::Email => "email",
            ReferenceField::RoleName => "role",
            ReferenceField::CustomerName => "customer",
        };
        write!(f, "{}", name)
    }
}

/// A row that could not be resolved: the first failing field in
/// declaration order (email, role, customer) and the offending value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub row: usize,
    pub field: ReferenceField,
    pub value: String,
}

/// What to do with rows that fail resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum FailurePolicy {
    /// Log unresolved rows and import the rest
    #[default]
    Tolerant,
    /// Abort the whole batch if any row is unresolved
    Strict,
}

impl FailurePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tolerant" => Some(FailurePolicy::Tolerant),
            "strict" => Some(FailurePolicy::Strict),
            _ => None,
        }
    }
}

/// Counts returned by the idempotent writer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    pub inserted: u64,
    pub skipped: u64,
}

/// Summary of a completed import run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Aligned rows read from the workbook
    pub total_rows: usize,
    /// Rows whose keys all resolved
    pub resolved: usize,
    /// Rows dropped (tolerant policy) because a key did not resolve
    pub unresolved: usize,
    /// New grants written this run
    pub inserted: u64,
    /// Grants already present in the store
    pub skipped: u64,
}
