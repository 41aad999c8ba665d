//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{LeagueId, ScoringPeriod, Season, TeamId};

/// Teams scraped when `--team-id` is not given.
pub const DEFAULT_TEAM_IDS: [u32; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

/// Arguments shared by the scrape command.
#[derive(Debug, Args)]
pub struct ScrapeArgs {
    /// League ID (or set `ESPN_FLB_LEAGUE_ID` env var).
    #[clap(long, short)]
    pub league_id: Option<LeagueId>,

    /// Season year (e.g. 2025).
    #[clap(long, short, default_value_t = Season::default())]
    pub season: Season,

    /// Fantasy team IDs to scrape (repeatable or comma separated): `-t 1,2,3`.
    #[clap(
        long = "team-id",
        short = 't',
        value_delimiter = ',',
        default_values_t = DEFAULT_TEAM_IDS.map(TeamId::new)
    )]
    pub team_ids: Vec<TeamId>,

    /// First scoring period to scrape (inclusive).
    #[clap(long, default_value_t = ScoringPeriod::default())]
    pub start_period: ScoringPeriod,

    /// Last scoring period to scrape (inclusive). Defaults to `--start-period`.
    #[clap(long)]
    pub end_period: Option<ScoringPeriod>,

    /// JSON file of extra `{"<statId>": "<name>"}` mappings.
    #[clap(long)]
    pub stat_map: Option<PathBuf>,

    /// Abort a single ESPN request after this many seconds (no limit when unset).
    #[clap(long)]
    pub timeout_secs: Option<u64>,

    /// Also upsert into a local SQLite database.
    #[clap(long)]
    pub local_db: bool,

    /// Path for the local SQLite database (implies `--local-db`).
    #[clap(long)]
    pub local_db_path: Option<PathBuf>,

    /// Also write the CSV snapshot into this directory.
    #[clap(long)]
    pub csv_dir: Option<PathBuf>,

    /// Fetch and summarize only; skip every sink.
    #[clap(long)]
    pub dry_run: bool,
}

#[derive(Debug, Parser)]
#[clap(
    name = "espn-flb-stats",
    about = "Scrape ESPN fantasy baseball roster stats into a database and a CSV snapshot"
)]
pub struct FlbStats {
    /// Enable debug logging (overridden by `RUST_LOG`).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch roster stats for every team and scoring period, then write them to the sinks.
    ///
    /// Sinks are configured through the environment: `SUPABASE_URL`/`SUPABASE_KEY`
    /// for the database and `GCS_BUCKET_NAME` for the CSV snapshot. A sink whose
    /// settings are missing is skipped.
    Scrape {
        #[clap(flatten)]
        args: ScrapeArgs,
    },

    /// Print the stat id to name table used when mapping stats.
    StatNames {
        /// JSON file of extra `{"<statId>": "<name>"}` mappings.
        #[clap(long)]
        stat_map: Option<PathBuf>,

        /// Output the table as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}
