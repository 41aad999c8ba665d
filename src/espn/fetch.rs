//! Period × team fetch loop.
//!
//! One request per (scoring period, team). A failed request is logged and
//! skipped; nothing here retries or aborts the run.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::{
    cli::types::{LeagueId, ScoringPeriod, Season, TeamId},
    espn::{http::RosterClient, stat_map::StatNameMap, types::LeagueRosterResponse},
    models::StatRecord,
};

/// What a fetch run attempted and produced.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub requests: usize,
    pub failed_requests: usize,
    pub records: usize,
}

impl FetchSummary {
    pub fn succeeded_requests(&self) -> usize {
        self.requests - self.failed_requests
    }
}

/// Build one record per roster entry of the first team in `response`.
///
/// The stats come from the entry's first stat line for `period`; an entry with
/// no such line still yields a record, with empty stats.
pub fn records_from_roster(
    response: &LeagueRosterResponse,
    team_id: TeamId,
    period: ScoringPeriod,
    stat_map: &StatNameMap,
    now: DateTime<Utc>,
) -> Vec<StatRecord> {
    let Some(team) = response.first_team() else {
        return Vec::new();
    };

    team.roster
        .entries
        .iter()
        .map(|entry| {
            let player = &entry.player_pool_entry.player;
            let stats = player
                .stats_for_period(period)
                .map(|line| stat_map.map_stats(&line.stats))
                .unwrap_or_default();

            StatRecord {
                team_id,
                scoring_period_id: period,
                player_id: player.id,
                full_name: player.full_name.clone().unwrap_or_default(),
                lineup_slot_id: entry.lineup_slot_id,
                stats,
                updated_at: now,
            }
        })
        .collect()
}

/// Fetch every (period, team) pair in period-major order and collect records.
pub async fn fetch_stat_records(
    client: &RosterClient,
    league_id: LeagueId,
    season: Season,
    team_ids: &[TeamId],
    periods: &[ScoringPeriod],
    stat_map: &StatNameMap,
) -> (Vec<StatRecord>, FetchSummary) {
    let mut records = Vec::new();
    let mut summary = FetchSummary::default();

    for &period in periods {
        for &team_id in team_ids {
            summary.requests += 1;

            match client
                .get_team_roster(league_id, season, team_id, period)
                .await
            {
                Ok(response) => {
                    let batch =
                        records_from_roster(&response, team_id, period, stat_map, Utc::now());
                    info!(
                        period = %period,
                        team = %team_id,
                        players = batch.len(),
                        "fetched roster"
                    );
                    records.extend(batch);
                }
                Err(e) => {
                    summary.failed_requests += 1;
                    warn!(period = %period, team = %team_id, error = %e, "skipping roster");
                }
            }
        }
    }

    summary.records = records.len();
    (records, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::types::PlayerId;
    use serde_json::json;

    fn response(entries: serde_json::Value) -> LeagueRosterResponse {
        serde_json::from_value(json!({
            "teams": [ { "id": 5, "roster": { "entries": entries } } ]
        }))
        .unwrap()
    }

    fn entry(id: u64, name: &str, slot: u16, stats: serde_json::Value) -> serde_json::Value {
        json!({
            "playerId": id,
            "lineupSlotId": slot,
            "playerPoolEntry": { "player": { "id": id, "fullName": name, "stats": stats } }
        })
    }

    #[test]
    fn test_one_record_per_roster_entry() {
        let response = response(json!([
            entry(1, "A", 0, json!([{ "scoringPeriodId": 4, "stats": { "5": 1 } }])),
            entry(2, "B", 1, json!([])),
            entry(3, "C", 16, json!([{ "scoringPeriodId": 3, "stats": { "5": 9 } }])),
        ]));

        let now = Utc::now();
        let records = records_from_roster(
            &response,
            TeamId::new(5),
            ScoringPeriod::new(4),
            &StatNameMap::builtin(),
            now,
        );

        assert_eq!(records.len(), 3);
        assert_eq!(
            records.iter().map(|r| r.player_id).collect::<Vec<_>>(),
            vec![PlayerId::new(1), PlayerId::new(2), PlayerId::new(3)]
        );
        assert!(records.iter().all(|r| r.team_id == TeamId::new(5)));
        assert!(records.iter().all(|r| r.scoring_period_id == ScoringPeriod::new(4)));
        assert!(records.iter().all(|r| r.updated_at == now));
    }

    #[test]
    fn test_stats_taken_from_matching_period_and_mapped() {
        let response = response(json!([entry(
            1,
            "A",
            2,
            json!([
                { "scoringPeriodId": 0, "stats": { "5": 40 } },
                { "scoringPeriodId": 4, "stats": { "5": 1, "21": 3, "777": 0.5 } }
            ])
        )]));

        let records = records_from_roster(
            &response,
            TeamId::new(5),
            ScoringPeriod::new(4),
            &StatNameMap::builtin(),
            Utc::now(),
        );

        let stats = &records[0].stats;
        assert_eq!(stats.get("HR"), Some(&json!(1)));
        assert_eq!(stats.get("RBI"), Some(&json!(3)));
        assert_eq!(stats.get("777"), Some(&json!(0.5)));
        assert_eq!(records[0].lineup_slot_id, 2);
    }

    #[test]
    fn test_no_matching_period_yields_empty_stats() {
        let response = response(json!([entry(
            9,
            "Bench Guy",
            16,
            json!([{ "scoringPeriodId": 1, "stats": { "5": 1 } }])
        )]));

        let records = records_from_roster(
            &response,
            TeamId::new(5),
            ScoringPeriod::new(2),
            &StatNameMap::builtin(),
            Utc::now(),
        );

        assert_eq!(records.len(), 1);
        assert!(records[0].stats.is_empty());
        assert_eq!(records[0].full_name, "Bench Guy");
    }

    #[test]
    fn test_missing_team_yields_no_records() {
        let empty: LeagueRosterResponse = serde_json::from_value(json!({ "teams": [] })).unwrap();
        let records = records_from_roster(
            &empty,
            TeamId::new(1),
            ScoringPeriod::new(1),
            &StatNameMap::builtin(),
            Utc::now(),
        );
        assert!(records.is_empty());
    }

    #[test]
    fn test_summary_succeeded_requests() {
        let summary = FetchSummary {
            requests: 6,
            failed_requests: 2,
            records: 40,
        };
        assert_eq!(summary.succeeded_requests(), 4);
    }
}
