use crate::cli::types::{PlayerId, ScoringPeriod, Season, TeamId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;


/// Top-level envelope for `view=mRoster` filtered with `forTeamId`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LeagueRosterResponse {
    #[serde(default)]
    pub teams: Vec<TeamRoster>,
}

impl LeagueRosterResponse {
    /// ESPN returns only the requested team when `forTeamId` is set, so the
    /// first element is the one we asked for.
    pub fn first_team(&self) -> Option<&TeamRoster> {
        self.teams.first()
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TeamRoster {
    pub id: TeamId,
    #[serde(default)]
    pub roster: Roster,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Roster {
    #[serde(default)]
    pub entries: Vec<RosterEntry>,
}

/// One player's slot on a fantasy roster
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RosterEntry {
    #[serde(rename = "playerId")]
    pub player_id: PlayerId,
    #[serde(rename = "lineupSlotId", default)]
    pub lineup_slot_id: u16,
    #[serde(rename = "playerPoolEntry")]
    pub player_pool_entry: PlayerPoolEntry,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerPoolEntry {
    pub player: Player,
}

/// Player data from ESPN API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Player {
    pub id: PlayerId,
    #[serde(rename = "fullName", default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub stats: Vec<PlayerStatLine>,
}

impl Player {
    /// First stat line recorded for `period`, if any.
    pub fn stats_for_period(&self, period: ScoringPeriod) -> Option<&PlayerStatLine> {
        self.stats
            .iter()
            .find(|line| line.scoring_period_id == period)
    }
}

/// Player statistics for a specific period
///
/// Values are kept as raw JSON; ESPN mixes integer counts and ratios here.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerStatLine {
    #[serde(rename = "seasonId", default)]
    pub season_id: Option<Season>,
    #[serde(rename = "scoringPeriodId")]
    pub scoring_period_id: ScoringPeriod,
    #[serde(rename = "statSourceId", default)]
    pub stat_source_id: u8,
    #[serde(rename = "statSplitTypeId", default)]
    pub stat_split_type_id: u8,
    #[serde(default)]
    pub stats: BTreeMap<String, Value>,
}
