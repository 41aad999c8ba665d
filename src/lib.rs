//! ESPN Fantasy Baseball Stats Scraper Library
//!
//! Pulls per-player roster stats out of the ESPN fantasy baseball API for a
//! set of teams and scoring periods, renames the numeric stat ids to readable
//! names, and writes the resulting records to a PostgREST (Supabase) table and
//! a CSV snapshot in Google Cloud Storage.
//!
//! ## Features
//!
//! - **Roster Retrieval**: One `mRoster` request per (scoring period, team)
//! - **Stat Mapping**: Built-in stat id table, extendable from a JSON file
//! - **Batched Upserts**: Database writes in batches of 500 keyed on player and period
//! - **CSV Snapshots**: Flattened records uploaded to a bucket, optionally kept locally
//! - **Local Mirror**: Optional SQLite copy of everything written
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use espn_flb_stats::{
//!     commands::scrape::{run_scrape, Endpoints, ScrapePlan},
//!     config::SinkConfig,
//!     core::build_http_client,
//!     espn::stat_map::StatNameMap,
//!     LeagueId, ScoringPeriod, Season, TeamId,
//! };
//!
//! # async fn example() -> espn_flb_stats::Result<()> {
//! let plan = ScrapePlan {
//!     league_id: LeagueId::new(123456),
//!     season: Season::new(2025),
//!     team_ids: vec![TeamId::new(1), TeamId::new(2)],
//!     periods: ScoringPeriod::range(ScoringPeriod::new(1), ScoringPeriod::new(7))?,
//!     stat_map: StatNameMap::builtin(),
//!     timeout: None,
//!     local_db: None,
//!     csv_dir: None,
//!     dry_run: true,
//! };
//!
//! let client = build_http_client()?;
//! let (records, _report) =
//!     run_scrape(&client, &plan, &SinkConfig::from_env(), &Endpoints::default()).await?;
//! println!("{} records", records.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! Set your ESPN league ID to avoid passing it in every command:
//! ```bash
//! export ESPN_FLB_LEAGUE_ID=123456
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod espn;
pub mod models;
pub mod sinks;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{LeagueId, PlayerId, ScoringPeriod, Season, TeamId};
pub use error::{Result, ScrapeError};
pub use models::StatRecord;

pub const LEAGUE_ID_ENV_VAR: &str = "ESPN_FLB_LEAGUE_ID";
