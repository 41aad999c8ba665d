//! Hosted database sink: Supabase's PostgREST upsert endpoint.

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::info;

use super::{upsert_in_batches, BatchReport, RecordStore, SinkOutcome, DEFAULT_BATCH_SIZE};
use crate::{config::SupabaseConfig, models::StatRecord, Result, ScrapeError};

/// Table holding one row per player per scoring period.
pub const STATS_TABLE: &str = "player_daily_stats";

/// Unique key the upsert resolves conflicts on.
pub const CONFLICT_COLUMNS: &str = "player_id,scoring_period_id";

pub struct PostgrestStore {
    client: Client,
    endpoint: String,
    key: String,
}

impl PostgrestStore {
    pub fn new(client: Client, config: &SupabaseConfig) -> Self {
        let endpoint = format!(
            "{}/rest/v1/{STATS_TABLE}",
            config.url.trim_end_matches('/')
        );
        Self {
            client,
            endpoint,
            key: config.key.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecordStore for PostgrestStore {
    fn name(&self) -> &str {
        "supabase"
    }

    async fn upsert_batch(&mut self, batch: &[StatRecord]) -> Result<()> {
        let res = self
            .client
            .post(&self.endpoint)
            .query(&[("on_conflict", CONFLICT_COLUMNS)])
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(batch)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ScrapeError::SinkRejected {
                sink: self.name().to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

/// Upsert every record into the hosted table, or skip when unconfigured.
///
/// No request is made when `config` is `None`.
pub async fn upsert_to_supabase(
    client: &Client,
    config: Option<&SupabaseConfig>,
    records: &[StatRecord],
) -> SinkOutcome<BatchReport> {
    let Some(config) = config else {
        info!("SUPABASE_URL/SUPABASE_KEY not set; skipping database upsert");
        return SinkOutcome::Skipped("database credentials not configured".to_string());
    };

    let mut store = PostgrestStore::new(client.clone(), config);
    let report = upsert_in_batches(&mut store, records, DEFAULT_BATCH_SIZE).await;
    SinkOutcome::Completed(report)
}
