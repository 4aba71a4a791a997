//! Serve command handler
//!
//! Runs the API and the front-end's static files in the foreground.

use crate::config::Config;
use crate::error::Result;
use crate::server;
use clap::Args;
use tracing::{info, warn};

/// Serve command arguments
#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short = 'p')]
    pub port: Option<u16>,
}

/// Apply `--host`/`--port` on top of the loaded config
pub fn apply_overrides(config: &mut Config, args: &ServeArgs) {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
}

/// Run the serve command
pub async fn run(args: ServeArgs) -> Result<()> {
    super::init_logging("info");

    match Config::config_path() {
        Ok(path) => info!("Loading config from {}", path.display()),
        Err(e) => warn!("No config directory: {}", e),
    }
    let mut config = Config::load()?;
    apply_overrides(&mut config, &args);

    // The server still starts; every explore request will report Auth
    if !config.imagery_configured() {
        warn!("No imagery access token configured; set one with `say-to-go config imagery.access_token <token>`");
    }

    info!(
        "Starting say-to-go server v{} on {} (geocoder {})",
        env!("CARGO_PKG_VERSION"),
        config.server_addr(),
        config.geocoder.base_url
    );

    server::run(config).await
}
