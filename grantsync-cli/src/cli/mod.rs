//! Command-line interface definitions

pub mod commands;

use clap::{Parser, Subcommand};

use crate::cli::commands::import::ImportArgs;

#[derive(Parser)]
#[command(
    name = "grantsync-cli",
    about = "Import customer permission grants from Excel into the application database",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import permission grants from an Excel workbook
    Import(ImportArgs),
}
