//! rscrape - scrape UDP trackers from the command line
//!
//! Prints `<hash> <seeders> <leechers> <completed>` for every valid hash.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use rscrape::scrape_once;

#[derive(Parser)]
#[command(name = "rscrape")]
#[command(about = "Scrape seeder and leecher counts from UDP trackers")]
struct Cli {
    /// Tracker to query, e.g. udp://tracker.example.org:1337 (repeatable)
    #[arg(short, long = "tracker", required = true)]
    trackers: Vec<String>,

    /// Info hashes as 40 character hex strings
    #[arg(required = true)]
    info_hashes: Vec<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    for result in scrape_once(&cli.trackers, &cli.info_hashes).await {
        println!(
            "{} {} {} {}",
            result.info_hash, result.seeders, result.leechers, result.completed
        );
    }
}
