//! Import command: arguments and handler

mod handler;

pub use handler::handle_import_command;

use std::path::PathBuf;

use clap::Args;

use crate::import::FailurePolicy;

#[derive(Args)]
pub struct ImportArgs {
    /// Path to the Excel workbook (overrides EXCEL_PATH)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Failure policy for unresolved rows (overrides IMPORT_POLICY)
    #[arg(long, value_enum)]
    pub policy: Option<FailurePolicy>,
}
