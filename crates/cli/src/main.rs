//! VectorGo CLI
//!
//! Main entry point for the vectorgo command-line tool.
//! Provides commands for uploading, searching, and managing documents
//! in a VectorGo server.

mod commands;

use clap::{Parser, Subcommand};
use commands::{
    DeleteCommand, HealthCommand, LoginCommand, LogoutCommand, ResetCommand, SearchCommand,
    StatsCommand, UploadCommand,
};
use std::path::PathBuf;
use vectorgo_core::{config::AppConfig, logging, AppResult};

/// VectorGo CLI - upload, search, and manage documents in a VectorGo server
#[derive(Parser, Debug)]
#[command(name = "vectorgo")]
#[command(about = "Client for the VectorGo document-ingestion and vector-search service", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the VectorGo server
    #[arg(short, long, global = true, env = "VECTORGO_SERVER")]
    server: Option<String>,

    /// Directory for session state (token, config)
    #[arg(long, global = true, env = "VECTORGO_HOME")]
    home: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "VECTORGO_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and persist the session token
    Login(LoginCommand),

    /// Drop the persisted session token
    Logout(LogoutCommand),

    /// Upload a PDF and follow its processing progress
    Upload(UploadCommand),

    /// Search indexed documents
    Search(SearchCommand),

    /// Show collection statistics
    Stats(StatsCommand),

    /// Delete one indexed file
    Delete(DeleteCommand),

    /// Reset the whole collection
    Reset(ResetCommand),

    /// Check service health
    Health(HealthCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Load base configuration from file and environment
    let config = AppConfig::load()?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.server,
        cli.home,
        cli.config,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("VectorGo CLI starting");
    tracing::debug!("Server: {}", config.server_url);
    tracing::debug!("Data dir: {:?}", config.data_dir);

    config.ensure_data_dir()?;

    let command_name = match &cli.command {
        Commands::Login(_) => "login",
        Commands::Logout(_) => "logout",
        Commands::Upload(_) => "upload",
        Commands::Search(_) => "search",
        Commands::Stats(_) => "stats",
        Commands::Delete(_) => "delete",
        Commands::Reset(_) => "reset",
        Commands::Health(_) => "health",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Login(cmd) => cmd.execute(&config).await,
        Commands::Logout(cmd) => cmd.execute(&config).await,
        Commands::Upload(cmd) => cmd.execute(&config).await,
        Commands::Search(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
        Commands::Delete(cmd) => cmd.execute(&config).await,
        Commands::Reset(cmd) => cmd.execute(&config).await,
        Commands::Health(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
