//! Find command handler
//!
//! Resolves a place name, finds imagery for it and optionally hops to nearby
//! areas, the way the voice front-end would.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::url::UrlFormatter;
use crate::format::{available_formats, get_formatter, Report};
use crate::geo::GeoBackend;
use crate::imagery::ImageryBackend;
use crate::notice::Notice;
use crate::pipeline::Explorer;
use crate::session::SessionState;
use clap::Args;
use tracing::debug;

/// Find command arguments
#[derive(Args)]
pub struct FindArgs {
    /// Place name, e.g. "Eiffel Tower, Paris"
    #[arg(required_unless_present = "list_formats", num_args = 1..)]
    pub query: Vec<String>,

    /// Output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: String,

    /// Map URL provider (url format only)
    #[arg(long)]
    pub provider: Option<String>,

    /// Hop to this many nearby areas after the first location
    #[arg(long, short = 'n', default_value = "0")]
    pub nearby: usize,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

/// Run the find command
pub async fn run(args: FindArgs) -> Result<()> {
    if args.list_formats {
        list_formats();
        return Ok(());
    }

    super::init_logging("warn");

    let config = Config::load()?;
    let formatter = get_formatter(&args.format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", args.format)))?;

    let query = args.query.join(" ");
    let explorer = Explorer::from_config(&config)?;

    let exploration = match explorer.explore(&query).await {
        Ok(exploration) => exploration,
        Err(e) => {
            let notice = Notice::for_error(&query, &e);
            eprintln!("{}", notice.message);
            std::process::exit(1);
        }
    };

    let mut session = SessionState::new();
    exploration.display.record(&mut session);
    let mut report = Report::from(exploration);
    hop_nearby(&explorer, &mut session, &mut report, args.nearby).await;

    let output = if args.format.eq_ignore_ascii_case("url") {
        UrlFormatter.format_with_provider(&report, &config, args.provider.as_deref())?
    } else {
        formatter.format(&report, &config)?
    };

    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path);
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Move to up to `hops` nearby areas, each anchored on the previous stop
///
/// Stops early with a notice when a search comes up empty or fails.
pub(crate) async fn hop_nearby<G: GeoBackend, I: ImageryBackend>(
    explorer: &Explorer<G, I>,
    session: &mut SessionState,
    report: &mut Report,
    hops: usize,
) {
    for hop in 0..hops {
        let label = session.get().map(|l| l.label.clone()).unwrap_or_default();
        debug!("Nearby hop {} of {} from \"{}\"", hop + 1, hops, label);

        match explorer.next_near_area(session).await {
            Ok(Some(display)) => {
                display.record(session);
                report.stops.push(display);
            }
            Ok(None) => {
                report.notices.push(Notice::no_nearby(&label));
                break;
            }
            Err(e) => {
                report.notices.push(Notice::for_error(&label, &e));
                break;
            }
        }
    }
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::ResolvedLocation;
    use crate::imagery::ImageReference;
    use crate::testutil::{geo_hit, FakeGeocoder, FakeImagery};
    use crate::viewer::ViewerSettings;

    #[tokio::test]
    async fn test_hops_anchor_on_previous_stop() {
        let explorer = Explorer::new(
            FakeGeocoder::new(|_| geo_hit(0.0, 0.0)),
            FakeImagery::new(|_| Ok(Some(ImageReference::new("x")))),
            ViewerSettings::default(),
        );
        let mut session = SessionState::new();
        let exploration = explorer.explore("Null Island").await.unwrap();
        exploration.display.record(&mut session);
        let mut report = Report::from(exploration);

        hop_nearby(&explorer, &mut session, &mut report, 2).await;

        assert_eq!(report.stops.len(), 3);
        assert_eq!(report.stops[1].location.label, "Nearby area (0.0010, 0.0010)");
        assert_eq!(report.stops[2].location.label, "Nearby area (0.0020, 0.0020)");
        assert!(report.notices.is_empty());
        assert_eq!(session.get().unwrap(), &report.stops[2].location);
    }

    #[tokio::test]
    async fn test_hops_stop_when_exhausted() {
        let explorer = Explorer::new(
            FakeGeocoder::new(|_| Ok(None)),
            FakeImagery::new(|_| Ok(None)),
            ViewerSettings::default(),
        );
        let mut session = SessionState::new();
        session.set(ResolvedLocation::new(10.0, 10.0, "Somewhere").unwrap());
        let mut report = Report::default();

        hop_nearby(&explorer, &mut session, &mut report, 3).await;

        assert!(report.stops.is_empty());
        assert_eq!(report.notices.len(), 1);
        assert!(report.notices[0].message.contains("\"Somewhere\""));
    }
}
