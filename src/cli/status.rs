//! Status command handler
//!
//! Shows configuration health and, optionally, whether the server is up.

use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Status command arguments
#[derive(Args)]
pub struct StatusArgs {
    /// Check if server is running (tries to connect)
    #[arg(long)]
    pub server: bool,
}

/// Run the status command
pub async fn run(args: StatusArgs) -> Result<()> {
    let config = Config::load()?;

    // Check server status if requested
    if args.server {
        check_server_status(&config).await;
    }

    println!("say-to-go v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Config: {}", Config::config_path()?.display());
    println!(
        "Imagery: {} ({})",
        config.imagery.base_url,
        if config.imagery_configured() {
            "token configured"
        } else {
            "NO TOKEN - run `say-to-go config imagery.access_token <token>`"
        }
    );
    println!("Geocoder: {}", config.geocoder.base_url);
    println!("  User-Agent: {}", config.geocoder.user_agent);

    Ok(())
}

/// Check if the server is running
async fn check_server_status(config: &Config) {
    let url = format!("http://{}/api/status", config.server_addr());

    match reqwest::get(&url).await {
        Ok(response) => {
            if response.status().is_success() {
                println!("Server: RUNNING on {}", config.server_addr());
                if let Ok(status) = response.json::<serde_json::Value>().await {
                    if let Some(version) = status.get("version").and_then(|v| v.as_str()) {
                        println!("  Version: {}", version);
                    }
                    match status.get("current").and_then(|c| c.get("label")).and_then(|v| v.as_str()) {
                        Some(label) => println!("  Showing: {}", label),
                        None => println!("  Showing: nothing yet"),
                    }
                }
            } else {
                println!("Server: ERROR (status {})", response.status());
            }
        }
        Err(_) => {
            println!("Server: NOT RUNNING on {}", config.server_addr());
        }
    }
    println!();
}
