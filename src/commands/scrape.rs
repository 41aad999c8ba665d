//! Scrape command: fetch every (period, team) roster, then hand the records
//! to each sink in turn.
//!
//! Once the plan is valid nothing here fails the run. Fetch errors, sink
//! errors and unconfigured sinks all end up as log lines and in the
//! [`ScrapeReport`].

use std::{path::PathBuf, time::Duration};

use reqwest::Client;
use tracing::{error, info, warn};

use super::resolve_league_id;
use crate::{
    cli::{
        types::{LeagueId, ScoringPeriod, Season, TeamId},
        ScrapeArgs,
    },
    config::SinkConfig,
    core::{build_http_client, write_bytes},
    espn::{
        fetch::{fetch_stat_records, FetchSummary},
        http::{RosterClient, ESPN_API_HOST},
        stat_map::StatNameMap,
    },
    models::StatRecord,
    sinks::{
        csv_snapshot::{snapshot_file_name, snapshot_object_name, to_csv_bytes},
        gcs::{upload_snapshot, STORAGE_API_BASE},
        postgrest::upsert_to_supabase,
        upsert_in_batches, BatchReport, SinkOutcome, DEFAULT_BATCH_SIZE,
    },
    storage::StatsDatabase,
    Result, ScrapeError,
};

/// Everything one scrape run needs, validated.
#[derive(Debug, Clone)]
pub struct ScrapePlan {
    pub league_id: LeagueId,
    pub season: Season,
    pub team_ids: Vec<TeamId>,
    /// Must not be empty; see [`ScrapePlan::validate`].
    pub periods: Vec<ScoringPeriod>,
    pub stat_map: StatNameMap,
    pub timeout: Option<Duration>,
    pub local_db: Option<PathBuf>,
    pub csv_dir: Option<PathBuf>,
    pub dry_run: bool,
}

impl ScrapePlan {
    pub fn from_args(args: ScrapeArgs) -> Result<Self> {
        let league_id = resolve_league_id(args.league_id)?;
        if args.team_ids.is_empty() {
            return Err(ScrapeError::NoTeams);
        }

        let end = args.end_period.unwrap_or(args.start_period);
        let periods = ScoringPeriod::range(args.start_period, end)?;
        let stat_map = StatNameMap::from_optional_path(args.stat_map.as_deref())?;

        let local_db = match (args.local_db_path, args.local_db) {
            (Some(path), _) => Some(path),
            (None, true) => Some(StatsDatabase::default_path()),
            (None, false) => None,
        };

        Ok(Self {
            league_id,
            season: args.season,
            team_ids: args.team_ids,
            periods,
            stat_map,
            timeout: args.timeout_secs.map(Duration::from_secs),
            local_db,
            csv_dir: args.csv_dir,
            dry_run: args.dry_run,
        })
    }

    /// Reject plans that would leave nothing to fetch.
    pub fn validate(&self) -> Result<()> {
        if self.team_ids.is_empty() {
            return Err(ScrapeError::NoTeams);
        }
        if self.periods.is_empty() {
            return Err(ScrapeError::NoPeriods);
        }
        Ok(())
    }

    /// Panics on an empty period list; call [`ScrapePlan::validate`] first.
    pub fn first_period(&self) -> ScoringPeriod {
        self.periods[0]
    }

    pub fn last_period(&self) -> ScoringPeriod {
        self.periods[self.periods.len() - 1]
    }

    /// `daily_stats/stats_period_{first}_to_{last}.csv`
    pub fn object_name(&self) -> String {
        snapshot_object_name(self.first_period(), self.last_period())
    }
}

/// Upstream hosts; tests point these at mock servers.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub espn: String,
    pub storage: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            espn: ESPN_API_HOST.to_string(),
            storage: STORAGE_API_BASE.to_string(),
        }
    }
}

/// What happened to the run, sink by sink.
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub fetch: FetchSummary,
    pub database: SinkOutcome<BatchReport>,
    pub local_db: SinkOutcome<BatchReport>,
    pub local_csv: SinkOutcome<PathBuf>,
    pub upload: SinkOutcome<usize>,
}

/// Fetch, then run every sink in sequence over the same record list.
pub async fn run_scrape(
    client: &Client,
    plan: &ScrapePlan,
    sinks: &SinkConfig,
    endpoints: &Endpoints,
) -> Result<(Vec<StatRecord>, ScrapeReport)> {
    plan.validate()?;

    let roster_client =
        RosterClient::with_base_url(client.clone(), &endpoints.espn)?.with_timeout(plan.timeout);

    info!(
        league = %plan.league_id,
        season = %plan.season,
        teams = plan.team_ids.len(),
        first_period = %plan.first_period(),
        last_period = %plan.last_period(),
        "starting scrape"
    );

    let (records, fetch) = fetch_stat_records(
        &roster_client,
        plan.league_id,
        plan.season,
        &plan.team_ids,
        &plan.periods,
        &plan.stat_map,
    )
    .await;

    if plan.dry_run {
        info!("dry run; skipping every sink");
        return Ok((
            records,
            ScrapeReport {
                fetch,
                database: dry_run_skip(),
                local_db: dry_run_skip(),
                local_csv: dry_run_skip(),
                upload: dry_run_skip(),
            },
        ));
    }

    let database = upsert_to_supabase(client, sinks.supabase.as_ref(), &records).await;
    let local_db = upsert_local(plan.local_db.as_ref(), &records).await;
    let local_csv = write_local_csv(plan, &records);
    let upload = upload_snapshot(
        client,
        sinks.gcs.as_ref(),
        &endpoints.storage,
        &records,
        &plan.object_name(),
    )
    .await;

    Ok((
        records,
        ScrapeReport {
            fetch,
            database,
            local_db,
            local_csv,
            upload,
        },
    ))
}

fn dry_run_skip<T>() -> SinkOutcome<T> {
    SinkOutcome::Skipped("dry run".to_string())
}

async fn upsert_local(path: Option<&PathBuf>, records: &[StatRecord]) -> SinkOutcome<BatchReport> {
    let Some(path) = path else {
        return SinkOutcome::Skipped("local database not requested".to_string());
    };

    match StatsDatabase::open(path) {
        Ok(mut db) => {
            let report = upsert_in_batches(&mut db, records, DEFAULT_BATCH_SIZE).await;
            SinkOutcome::Completed(report)
        }
        Err(e) => {
            let message = format!("{e:#}");
            error!(path = %path.display(), error = %message, "could not open local database");
            SinkOutcome::Failed(message)
        }
    }
}

fn write_local_csv(plan: &ScrapePlan, records: &[StatRecord]) -> SinkOutcome<PathBuf> {
    let Some(dir) = plan.csv_dir.as_ref() else {
        return SinkOutcome::Skipped("no local CSV directory".to_string());
    };

    let path = dir.join(snapshot_file_name(plan.first_period(), plan.last_period()));
    let written = to_csv_bytes(records).and_then(|bytes| Ok(write_bytes(&path, &bytes)?));

    match written {
        Ok(()) => {
            info!(path = %path.display(), "wrote local CSV snapshot");
            SinkOutcome::Completed(path)
        }
        Err(e) => {
            error!(path = %path.display(), error = %e, "could not write local CSV snapshot");
            SinkOutcome::Failed(e.to_string())
        }
    }
}

fn log_outcome<T: std::fmt::Debug>(sink: &str, outcome: &SinkOutcome<T>) {
    match outcome {
        SinkOutcome::Skipped(reason) => info!(sink, reason = %reason, "sink skipped"),
        SinkOutcome::Completed(detail) => info!(sink, detail = ?detail, "sink completed"),
        SinkOutcome::Failed(reason) => error!(sink, reason = %reason, "sink failed"),
    }
}

/// Log the end-of-run summary.
pub fn log_report(report: &ScrapeReport) {
    let fetch = &report.fetch;
    info!(
        requests = fetch.requests,
        succeeded = fetch.succeeded_requests(),
        failed = fetch.failed_requests,
        records = fetch.records,
        "fetch complete"
    );
    if fetch.requests > 0 && fetch.failed_requests == fetch.requests {
        warn!("every roster request failed; sinks received no records");
    }

    log_outcome("supabase", &report.database);
    log_outcome("sqlite", &report.local_db);
    log_outcome("local_csv", &report.local_csv);
    log_outcome("gcs", &report.upload);
}

/// Handle the scrape command
pub async fn handle_scrape(args: ScrapeArgs) -> Result<()> {
    let plan = ScrapePlan::from_args(args)?;
    let sinks = SinkConfig::from_env();
    let client = build_http_client()?;

    let (_, report) = run_scrape(&client, &plan, &sinks, &Endpoints::default()).await?;
    log_report(&report);

    Ok(())
}
