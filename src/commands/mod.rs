//! Command implementations for the stats scraper

pub mod scrape;
pub mod stat_names;

use crate::{cli::types::LeagueId, Result, ScrapeError, LEAGUE_ID_ENV_VAR};

/// Use the explicit league id, or fall back to `ESPN_FLB_LEAGUE_ID`.
pub fn resolve_league_id(league_id: Option<LeagueId>) -> Result<LeagueId> {
    if let Some(id) = league_id {
        return Ok(id);
    }

    let raw = std::env::var(LEAGUE_ID_ENV_VAR).map_err(|_| ScrapeError::MissingLeagueId {
        env_var: LEAGUE_ID_ENV_VAR.to_string(),
    })?;
    raw.parse()
}
