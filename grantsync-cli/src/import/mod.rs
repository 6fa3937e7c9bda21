//! Permission grant import pipeline
//!
//! Workbook rows flow through natural-key resolution, failure-policy
//! validation, and an idempotent bulk write, all within one import run:
//! source → resolver (via lookup index) → validator → writer.

pub mod error;
pub mod excel;
pub mod lookup;
pub mod resolver;
pub mod runner;
pub mod types;
pub mod validate;
pub mod writer;

pub use error::ImportError;
pub use excel::read_grant_rows;
pub use lookup::LookupIndex;
pub use resolver::{resolve_row, resolve_rows};
pub use runner::run_import;
pub use types::{
    FailurePolicy, GrantRow, ImportReport, ReferenceField, ResolvedGrant, UnresolvedReference,
    WriteOutcome,
};
pub use validate::apply_policy;
pub use writer::write_grants;
