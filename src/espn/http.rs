use std::time::Duration;

use reqwest::{header::HeaderMap, Client};
use tracing::debug;

use crate::{
    cli::types::{LeagueId, ScoringPeriod, Season, TeamId},
    core::common_headers,
    espn::types::LeagueRosterResponse,
    Result,
};


/// Host serving the ESPN fantasy v3 read API.
pub const ESPN_API_HOST: &str = "https://lm-api-reads.fantasy.espn.com";

/// Path prefix for fantasy baseball under the v3 API.
pub const FLB_GAME_PATH: &str = "/apis/v3/games/flb";

/// Client for the per-team roster endpoint (`view=mRoster`).
#[derive(Debug, Clone)]
pub struct RosterClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
    timeout: Option<Duration>,
}

impl RosterClient {
    /// Client against the public ESPN host with the common request headers.
    pub fn new(client: Client) -> Result<Self> {
        Self::with_base_url(client, ESPN_API_HOST)
    }

    /// Same as [`RosterClient::new`] but against another host (mock servers, proxies).
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers: common_headers()?,
            timeout: None,
        })
    }

    /// Bound each roster request; by default a request may wait forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn league_url(&self, season: Season, league_id: LeagueId) -> String {
        format!(
            "{}{FLB_GAME_PATH}/seasons/{}/segments/0/leagues/{}",
            self.base_url, season, league_id
        )
    }

    /// Fetch one team's roster, with per-player stat lines, for one scoring period.
    pub async fn get_team_roster(
        &self,
        league_id: LeagueId,
        season: Season,
        team_id: TeamId,
        period: ScoringPeriod,
    ) -> Result<LeagueRosterResponse> {
        let url = self.league_url(season, league_id);
        let params = [
            ("forTeamId", team_id.to_string()),
            ("scoringPeriodId", period.to_string()),
            ("view", "mRoster".to_string()),
        ];

        debug!(%url, team = %team_id, period = %period, "requesting roster");

        let mut req = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .query(&params);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let res = req
            .send()
            .await?
            .error_for_status()?
            .json::<LeagueRosterResponse>()
            .await?;

        Ok(res)
    }
}
