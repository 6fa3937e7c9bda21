//! Import command handler

use anyhow::Result;
use colored::*;

use super::ImportArgs;
use crate::config::Config;
use crate::db;
use crate::import::{ImportError, ImportReport, run_import};

/// Handle the import command: load config, connect, run the pipeline,
/// print the summary.
pub async fn handle_import_command(args: ImportArgs) -> Result<()> {
    let mut config = Config::from_env()?;

    // CLI flags win over environment settings
    if let Some(file) = args.file {
        config.excel_path = Some(file);
    }
    if let Some(policy) = args.policy {
        config.policy = policy;
    }

    let excel_path = config.excel_path.clone().ok_or_else(|| {
        ImportError::Configuration(
            "No workbook given. Set EXCEL_PATH in the environment or pass --file.".to_string(),
        )
    })?;

    log::info!("Starting permission grant import ({:?} policy)", config.policy);
    log::info!("Connecting to {} database", config.database.engine);

    let pool = db::connect(&config.database).await?;

    let report = run_import(&pool, &excel_path, config.policy).await?;

    print_summary(&report);

    Ok(())
}

fn print_summary(report: &ImportReport) {
    println!();
    println!("{}", "Import completed".green().bold());
    println!("  rows processed:  {}", report.total_rows);
    println!("  inserted:        {}", report.inserted.to_string().green());
    println!("  already present: {}", report.skipped);
    if report.unresolved > 0 {
        println!(
            "  unresolved:      {}",
            report.unresolved.to_string().yellow()
        );
    }
}
