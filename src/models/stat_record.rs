use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::cli::types::{PlayerId, ScoringPeriod, TeamId};

/// Names of the scalar columns, in output order. Sinks that flatten a record
/// use these verbatim.
pub const SCALAR_COLUMNS: [&str; 6] = [
    "team_id",
    "scoring_period_id",
    "player_id",
    "full_name",
    "lineup_slot_id",
    "updated_at",
];

/// One player's stats for one scoring period, as rostered by one team.
///
/// Uniquely identified downstream by `(player_id, scoring_period_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub team_id: TeamId,
    pub scoring_period_id: ScoringPeriod,
    pub player_id: PlayerId,
    pub full_name: String,
    pub lineup_slot_id: u16,
    /// Stat name (or raw id when unmapped) → value.
    pub stats: BTreeMap<String, Value>,
    pub updated_at: DateTime<Utc>,
}

impl StatRecord {
    /// Scalar fields rendered as text, aligned with [`SCALAR_COLUMNS`].
    pub fn scalar_values(&self) -> [String; 6] {
        [
            self.team_id.to_string(),
            self.scoring_period_id.to_string(),
            self.player_id.to_string(),
            self.full_name.clone(),
            self.lineup_slot_id.to_string(),
            self.updated_at.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        ]
    }
}
