//! say-to-go CLI entry point
//!
//! Voice location viewer - CLI + web app

use say_to_go::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
