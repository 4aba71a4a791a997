//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Config;
use crate::error::Result;
use crate::imagery::mapillary::token_configured;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "imagery.access_token")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    // Show path
    if args.path {
        let path = Config::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    // Reset config
    if args.reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut config = Config::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_config(&config);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = config.get(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Config::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save()?;
            if key == "imagery.access_token" {
                println!("{} = {}", key, mask_token(value.trim()));
            } else {
                println!("{} = {}", key, value);
            }
        }

        // Value without key: not valid
        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Hide all but the first few characters of an access token
pub fn mask_token(token: &str) -> String {
    if !token_configured(token) {
        return "\"\" # not configured".to_string();
    }
    let visible: String = token.chars().take(4).collect();
    format!("\"{}***\" # configured", visible)
}

/// Display all configuration values
fn show_all_config(config: &Config) {
    println!("[imagery]");
    println!("access_token = {}", mask_token(&config.imagery.access_token));
    println!("base_url = \"{}\"", config.imagery.base_url);
    println!();

    println!("[geocoder]");
    println!("base_url = \"{}\"", config.geocoder.base_url);
    println!("user_agent = \"{}\"", config.geocoder.user_agent);
    println!();

    println!("[server]");
    println!("host = \"{}\"", config.server.host);
    println!("port = {}", config.server.port);
    println!();

    println!("[viewer]");
    println!("container = \"{}\"", config.viewer.container);
    println!("layout_delay_ms = {}", config.viewer.layout_delay_ms);
    println!("components_delay_ms = {}", config.viewer.components_delay_ms);
    println!();

    println!("[notices]");
    println!("dismiss_secs = {}", config.notices.dismiss_secs);
    println!();

    println!("[url]");
    println!("default = \"{}\"", config.url.default);
    println!();

    println!("[url.providers]");
    let mut providers: Vec<_> = config.url.providers.iter().collect();
    providers.sort();
    for (name, template) in providers {
        println!("{} = \"{}\"", name, template);
    }
}
