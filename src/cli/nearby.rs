//! Nearby command handler
//!
//! Looks for imagery around a location the user already knows.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{get_formatter, Report};
use crate::geo::ResolvedLocation;
use crate::pipeline::Explorer;
use crate::session::SessionState;
use clap::Args;

/// Nearby command arguments
#[derive(Args)]
pub struct NearbyArgs {
    /// Latitude of the current location
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the current location
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,

    /// Name of the current location
    #[arg(long)]
    pub label: String,

    /// Number of nearby areas to visit
    #[arg(long, short = 'n', default_value = "1")]
    pub hops: usize,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,
}

/// Run the nearby command
pub async fn run(args: NearbyArgs) -> Result<()> {
    super::init_logging("warn");

    let config = Config::load()?;
    let formatter = get_formatter(&args.format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", args.format)))?;

    let mut session = SessionState::new();
    session.set(ResolvedLocation::new(args.lat, args.lng, args.label)?);

    let explorer = Explorer::from_config(&config)?;
    let mut report = Report::default();
    super::find::hop_nearby(&explorer, &mut session, &mut report, args.hops.max(1)).await;

    if report.stops.is_empty() {
        for notice in &report.notices {
            eprintln!("{}", notice.message);
        }
        std::process::exit(1);
    }

    println!("{}", formatter.format(&report, &config)?);
    Ok(())
}

