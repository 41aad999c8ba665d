//! Entry point: load `.env`, set up logging, parse CLI and dispatch to command handlers.

use clap::Parser;
use espn_flb_stats::{
    cli::{Commands, FlbStats},
    commands::{scrape::handle_scrape, stat_names::handle_stat_names},
    Result,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the process environment still applies.
    let _ = dotenvy::dotenv();

    let app = FlbStats::parse();
    init_tracing(app.verbose);

    match app.command {
        Commands::Scrape { args } => handle_scrape(args).await?,
        Commands::StatNames { stat_map, json } => handle_stat_names(stat_map, json)?,
    }

    Ok(())
}
