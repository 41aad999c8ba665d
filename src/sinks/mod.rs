//! Output sinks for fetched stat records
//!
//! - `postgrest`: hosted database upsert over REST
//! - `csv_snapshot`: flattening records into one wide CSV table
//! - `gcs`: uploading that CSV to object storage
//!
//! Database-style sinks implement [`RecordStore`] and are driven through
//! [`upsert_in_batches`], which bounds each request to one batch and keeps
//! going when a batch fails.

use async_trait::async_trait;
use tracing::{error, info};

use crate::{models::StatRecord, Result};

pub mod csv_snapshot;
pub mod gcs;
pub mod postgrest;


/// Rows per upsert request.
pub const DEFAULT_BATCH_SIZE: usize = 500;

/// A keyed store that accepts upserts on `(player_id, scoring_period_id)`.
#[async_trait]
pub trait RecordStore {
    /// Short label used in log lines.
    fn name(&self) -> &str;

    /// Insert or overwrite every record of `batch`.
    async fn upsert_batch(&mut self, batch: &[StatRecord]) -> Result<()>;
}

/// Totals from one [`upsert_in_batches`] run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub batches: usize,
    pub failed_batches: usize,
    pub rows_written: usize,
}

/// Result of handing the record list to one sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome<T> {
    /// The sink was not configured, or had nothing to do.
    Skipped(String),
    Completed(T),
    Failed(String),
}

impl<T> SinkOutcome<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, SinkOutcome::Skipped(_))
    }
}

/// Upsert `records` in contiguous, in-order chunks of `batch_size`.
///
/// Each chunk is its own request; a failed chunk is logged and counted, and
/// the remaining chunks are still sent.
pub async fn upsert_in_batches<S>(
    store: &mut S,
    records: &[StatRecord],
    batch_size: usize,
) -> BatchReport
where
    S: RecordStore,
{
    let mut report = BatchReport::default();

    for (index, batch) in records.chunks(batch_size.max(1)).enumerate() {
        report.batches += 1;
        match store.upsert_batch(batch).await {
            Ok(()) => {
                report.rows_written += batch.len();
                info!(
                    sink = store.name(),
                    batch = index + 1,
                    rows = batch.len(),
                    "upserted batch"
                );
            }
            Err(e) => {
                report.failed_batches += 1;
                error!(sink = store.name(), batch = index + 1, error = %e, "batch upsert failed");
            }
        }
    }

    report
}
