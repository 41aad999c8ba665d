//! Upserts and lookups on `player_daily_stats`

use super::schema::StatsDatabase;
use crate::{
    cli::types::{PlayerId, ScoringPeriod, TeamId},
    models::StatRecord,
    sinks::RecordStore,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

impl StatsDatabase {
    /// Upsert `records` in one transaction. Rows are keyed on
    /// `(player_id, scoring_period_id)`; the last write wins.
    pub fn upsert_records(&mut self, records: &[StatRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO player_daily_stats
                 (player_id, scoring_period_id, team_id, full_name, lineup_slot_id, stats, updated_at)
                 VALUES (?, ?, ?, ?, ?, ?, ?)
                 ON CONFLICT(player_id, scoring_period_id) DO UPDATE SET
                    team_id = excluded.team_id,
                    full_name = excluded.full_name,
                    lineup_slot_id = excluded.lineup_slot_id,
                    stats = excluded.stats,
                    updated_at = excluded.updated_at",
            )?;

            for record in records {
                let stats_json = serde_json::to_string(&record.stats)?;
                stmt.execute(params![
                    record.player_id.as_u64() as i64,
                    record.scoring_period_id.as_u16(),
                    record.team_id.as_u32(),
                    record.full_name,
                    record.lineup_slot_id,
                    stats_json,
                    record.updated_at.to_rfc3339(),
                ])
                .with_context(|| {
                    format!(
                        "upserting player {} period {}",
                        record.player_id, record.scoring_period_id
                    )
                })?;
            }
        }
        tx.commit()?;
        Ok(records.len())
    }

    /// Get the stored record for a player and scoring period
    pub fn get_record(
        &self,
        player_id: PlayerId,
        period: ScoringPeriod,
    ) -> Result<Option<StatRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT team_id, scoring_period_id, player_id, full_name, lineup_slot_id, stats, updated_at
             FROM player_daily_stats
             WHERE player_id = ? AND scoring_period_id = ?",
        )?;

        let result = stmt.query_row(
            params![player_id.as_u64() as i64, period.as_u16()],
            row_to_record,
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All records for one scoring period, ordered by team then player
    pub fn records_for_period(&self, period: ScoringPeriod) -> Result<Vec<StatRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT team_id, scoring_period_id, player_id, full_name, lineup_slot_id, stats, updated_at
             FROM player_daily_stats
             WHERE scoring_period_id = ?
             ORDER BY team_id, player_id",
        )?;

        let rows = stmt.query_map(params![period.as_u16()], row_to_record)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn count_records(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM player_daily_stats", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Convert a `player_daily_stats` row into a record
fn row_to_record(row: &Row) -> rusqlite::Result<StatRecord> {
    let stats_json: String = row.get(5)?;
    let stats = serde_json::from_str(&stats_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let updated_at_str: String = row.get(6)?;
    let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let player_id: i64 = row.get(2)?;

    Ok(StatRecord {
        team_id: TeamId::new(row.get(0)?),
        scoring_period_id: ScoringPeriod::new(row.get(1)?),
        player_id: PlayerId::new(player_id as u64),
        full_name: row.get(3)?,
        lineup_slot_id: row.get(4)?,
        stats,
        updated_at,
    })
}

#[async_trait]
impl RecordStore for StatsDatabase {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn upsert_batch(&mut self, batch: &[StatRecord]) -> crate::Result<()> {
        self.upsert_records(batch)?;
        Ok(())
    }
}
