//! Unit tests for storage functionality

use super::*;
use crate::{
    cli::types::{PlayerId, ScoringPeriod, TeamId},
    models::StatRecord,
    sinks::{upsert_in_batches, DEFAULT_BATCH_SIZE},
};
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::collections::BTreeMap;

fn create_test_db() -> StatsDatabase {
    StatsDatabase::new_in_memory().unwrap()
}

fn record(player: u64, period: u16, team: u32, hr: i64) -> StatRecord {
    let mut stats = BTreeMap::new();
    stats.insert("HR".to_string(), json!(hr));
    StatRecord {
        team_id: TeamId::new(team),
        scoring_period_id: ScoringPeriod::new(period),
        player_id: PlayerId::new(player),
        full_name: format!("Player {player}"),
        lineup_slot_id: 3,
        stats,
        updated_at: Utc.with_ymd_and_hms(2025, 4, 2, 10, 0, 0).unwrap(),
    }
}

#[test]
fn test_database_creation() {
    let db = create_test_db();
    assert_eq!(db.count_records().unwrap(), 0);
}

#[test]
fn test_upsert_and_read_back() {
    let mut db = create_test_db();
    let original = record(31097, 5, 2, 1);

    assert_eq!(db.upsert_records(&[original.clone()]).unwrap(), 1);

    let stored = db
        .get_record(PlayerId::new(31097), ScoringPeriod::new(5))
        .unwrap()
        .unwrap();
    assert_eq!(stored, original);
}

#[test]
fn test_upsert_overwrites_on_player_and_period() {
    let mut db = create_test_db();
    db.upsert_records(&[record(1, 5, 2, 1)]).unwrap();

    let mut moved = record(1, 5, 7, 3);
    moved.lineup_slot_id = 16;
    db.upsert_records(&[moved]).unwrap();

    assert_eq!(db.count_records().unwrap(), 1);
    let stored = db
        .get_record(PlayerId::new(1), ScoringPeriod::new(5))
        .unwrap()
        .unwrap();
    assert_eq!(stored.team_id, TeamId::new(7));
    assert_eq!(stored.lineup_slot_id, 16);
    assert_eq!(stored.stats.get("HR"), Some(&json!(3)));
}

#[test]
fn test_same_player_different_periods_are_distinct_rows() {
    let mut db = create_test_db();
    db.upsert_records(&[record(1, 5, 2, 1), record(1, 6, 2, 0)])
        .unwrap();
    assert_eq!(db.count_records().unwrap(), 2);
}

#[test]
fn test_get_record_missing() {
    let db = create_test_db();
    assert!(db
        .get_record(PlayerId::new(99), ScoringPeriod::new(1))
        .unwrap()
        .is_none());
}

#[test]
fn test_records_for_period_ordered_by_team_then_player() {
    let mut db = create_test_db();
    db.upsert_records(&[
        record(30, 8, 2, 0),
        record(10, 8, 2, 0),
        record(20, 8, 1, 0),
        record(40, 9, 1, 0),
    ])
    .unwrap();

    let ids: Vec<u64> = db
        .records_for_period(ScoringPeriod::new(8))
        .unwrap()
        .iter()
        .map(|r| r.player_id.as_u64())
        .collect();
    assert_eq!(ids, vec![20, 10, 30]);
}

#[test]
fn test_open_creates_file_and_parents() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("nested").join("stats.db");

    {
        let mut db = StatsDatabase::open(&path).unwrap();
        db.upsert_records(&[record(1, 1, 1, 0)]).unwrap();
    }

    assert!(path.exists());
    let db = StatsDatabase::open(&path).unwrap();
    assert_eq!(db.count_records().unwrap(), 1);
}

#[tokio::test]
async fn test_batch_driver_against_sqlite() {
    let mut db = create_test_db();
    let records: Vec<StatRecord> = (0..1200).map(|i| record(i, 3, 1, 0)).collect();

    let report = upsert_in_batches(&mut db, &records, DEFAULT_BATCH_SIZE).await;

    assert_eq!(report.batches, 3);
    assert_eq!(report.failed_batches, 0);
    assert_eq!(db.count_records().unwrap(), 1200);
}
