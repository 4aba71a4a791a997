//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod find;
pub mod nearby;
pub mod serve;
pub mod status;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Find street-level 360° imagery for a spoken or typed place name
#[derive(Parser)]
#[command(name = "say-to-go")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a place name and find imagery for it
    Find(find::FindArgs),

    /// Find imagery near a known location
    Nearby(nearby::NearbyArgs),

    /// Start web server (foreground)
    Serve(serve::ServeArgs),

    /// Manage configuration
    Config(config::ConfigArgs),

    /// Show configuration and server status
    Status(status::StatusArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Find(args) => find::run(args).await,
        Commands::Nearby(args) => nearby::run(args).await,
        Commands::Serve(args) => serve::run(args).await,
        Commands::Config(args) => config::run(args),
        Commands::Status(args) => status::run(args).await,
    }
}

/// Initialize logging to stderr; `RUST_LOG` overrides `default_filter`
pub fn init_logging(default_filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
