//! Database schema and connection management

use crate::core::data_dir;
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Connection to the local `player_daily_stats` mirror
pub struct StatsDatabase {
    pub(crate) conn: Connection,
}

impl StatsDatabase {
    /// Open (or create) the database at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("opening database {}", path.display()))?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Throwaway database for tests
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// `~/.cache/espn-flb-stats/stats.db`
    pub fn default_path() -> PathBuf {
        data_dir().join("stats.db")
    }

    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS player_daily_stats (
                player_id INTEGER NOT NULL,
                scoring_period_id INTEGER NOT NULL,
                team_id INTEGER NOT NULL,
                full_name TEXT NOT NULL,
                lineup_slot_id INTEGER NOT NULL,
                stats TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (player_id, scoring_period_id)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_daily_stats_period_team
             ON player_daily_stats(scoring_period_id, team_id)",
            [],
        )?;

        Ok(())
    }
}
