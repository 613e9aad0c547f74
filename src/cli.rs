use clap::{Args, Parser, Subcommand, ValueEnum};
use tokio::signal;
use tracing::{info, instrument};

use crate::config::Config;
use crate::error::Result;

#[derive(Parser)]
#[command(name = "pulsegram")]
#[command(about = "A webhook relay from monday.com boards to Telegram")]
#[command(long_about = "
A single-binary HTTP service that accepts status-change webhooks from a
monday.com board, enriches them with extra column lookups, and forwards a
formatted message to a Telegram chat.
")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Override log level
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Run the webhook relay server (default if no subcommand given)
    Run(RunArgs),
    /// Validate environment configuration and report enabled features
    Validate,
    /// Show version information
    Version,
}

#[derive(Args, Clone)]
pub struct RunArgs {
    /// Override listen port
    #[arg(long)]
    pub port: Option<u16>,

    /// Set bind address (e.g. "127.0.0.1")
    #[arg(long)]
    pub bind: Option<String>,

    /// Set log format
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Get effective log level considering verbose/quiet flags
    pub fn effective_log_level(&self) -> LogLevel {
        if self.verbose {
            LogLevel::Debug
        } else if self.quiet {
            LogLevel::Error
        } else {
            self.log_level.clone().unwrap_or(LogLevel::Info)
        }
    }

    /// Convert LogLevel enum to string for logging module
    pub fn log_level_to_str(&self) -> &'static str {
        match self.effective_log_level() {
            LogLevel::Trace => crate::logging::level::TRACE,
            LogLevel::Debug => crate::logging::level::DEBUG,
            LogLevel::Info => crate::logging::level::INFO,
            LogLevel::Warn => crate::logging::level::WARN,
            LogLevel::Error => crate::logging::level::ERROR,
        }
    }

    /// Get log format override from CLI arguments
    pub fn log_format_override(&self) -> Option<&'static str> {
        match &self.command {
            Some(Commands::Run(args)) => args.log_format.as_ref().map(|fmt| match fmt {
                LogFormat::Json => crate::logging::format::JSON,
                LogFormat::Pretty => crate::logging::format::PRETTY,
            }),
            _ => None,
        }
    }
}

/// Run the webhook relay server
#[instrument(skip(args, config))]
pub async fn run_server(args: RunArgs, config: Option<Config>) -> Result<()> {
    let mut config = match config {
        Some(config) => config,
        None => Config::from_env()?,
    };

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    info!(
        listen = %config.server.listen_addr(),
        delivery_enabled = config.telegram.is_enabled(),
        enrichment_enabled = config.monday.is_enabled(),
        "Starting server"
    );

    let shutdown_signal = setup_shutdown_signal();
    crate::http::start_server(config, shutdown_signal).await
}

/// Validate environment configuration without starting the server
#[instrument(skip(config))]
pub async fn validate_config(config: Option<Config>) -> Result<()> {
    let config = match config {
        Some(config) => config,
        None => Config::from_env()?,
    };

    info!(listen = %config.server.listen_addr(), "Server configuration is valid");

    if config.telegram.is_enabled() {
        info!(
            parse_mode = ?config.telegram.parse_mode,
            "Telegram delivery is enabled"
        );
    } else {
        info!("Telegram delivery is disabled (TELEGRAM_BOT_TOKEN / TELEGRAM_CHAT_ID not set)");
    }

    if config.monday.is_enabled() {
        info!(
            description_column = %config.monday.description_column,
            requester_column = %config.monday.requester_column,
            "monday.com enrichment is enabled"
        );
    } else {
        info!("monday.com enrichment is disabled (MONDAY_API_TOKEN not set)");
    }

    info!("Configuration is valid");
    Ok(())
}

/// Show version and build information
#[instrument]
pub async fn show_version() -> Result<()> {
    println!("Pulsegram {}", env!("CARGO_PKG_VERSION"));
    println!("Description: {}", env!("CARGO_PKG_DESCRIPTION"));
    println!("License: {}", env!("CARGO_PKG_LICENSE"));
    println!();

    println!("Build Information:");
    println!(
        "  Build Profile: {}",
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        }
    );
    println!();

    println!("Runtime Information:");
    println!("  Platform: {}", std::env::consts::OS);
    println!("  Architecture: {}", std::env::consts::ARCH);

    Ok(())
}

/// Set up graceful shutdown signal handling for Linux
pub async fn setup_shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C");
        },
        _ = terminate => {
            info!("Received SIGTERM");
        },
    }
}
