use clap::Parser;

use grantsync_cli::cli::commands::import::handle_import_command;
use grantsync_cli::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import(args) => handle_import_command(args).await,
    };

    if let Err(e) = result {
        log::error!("Import failed: {:#}", e);
        std::process::exit(1);
    }
}
