//! Import customer permission grants from Excel workbooks into the
//! application database.
//!
//! The pipeline reads positionally-aligned rows from a multi-sheet
//! workbook, resolves natural keys (email, role name, customer name) to
//! database ids, and writes the resulting grants idempotently inside a
//! single transaction.

pub mod cli;
pub mod config;
pub mod db;
pub mod import;
