mod cli;
mod config;
mod enrichment;
mod error;
mod http;
mod logging;
mod notifications;

use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Commands, RunArgs};
use crate::config::Config;
use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Version doesn't need config; anything else tries to read the
    // environment for logging setup but doesn't fail yet. An invalid PORT
    // surfaces from the command itself with logging already initialized.
    let config = match &cli.command {
        Some(Commands::Version) => None,
        _ => Config::from_env().ok(),
    };

    let log_level_override = if cli.log_level.is_some() || cli.verbose || cli.quiet {
        Some(cli.log_level_to_str())
    } else {
        None
    };

    crate::logging::init(
        log_level_override,
        cli.log_format_override(),
        config.as_ref(),
    )?;

    info!("Starting Pulsegram");

    match cli.command.clone().unwrap_or(Commands::Run(RunArgs {
        port: None,
        bind: None,
        log_format: None,
    })) {
        Commands::Run(args) => cli::run_server(args, config).await,
        Commands::Validate => cli::validate_config(config).await,
        Commands::Version => cli::show_version().await,
    }
}
