//! Flatten stat records into one wide CSV table.
//!
//! Scalar fields come first under their own names, followed by one column per
//! distinct stat name across all records in first-seen order. A record that
//! lacks a stat gets an empty cell.

use std::collections::HashSet;

use serde_json::Value;

use crate::{
    cli::types::ScoringPeriod,
    models::{stat_record::SCALAR_COLUMNS, StatRecord},
    Result, ScrapeError,
};

/// Object-store folder for snapshots.
pub const SNAPSHOT_PREFIX: &str = "daily_stats";

/// `daily_stats/stats_period_{first}_to_{last}.csv`
pub fn snapshot_object_name(first: ScoringPeriod, last: ScoringPeriod) -> String {
    format!("{SNAPSHOT_PREFIX}/{}", snapshot_file_name(first, last))
}

pub fn snapshot_file_name(first: ScoringPeriod, last: ScoringPeriod) -> String {
    format!("stats_period_{}_to_{}.csv", first, last)
}

/// Distinct stat names across `records`, in first-seen order.
pub fn stat_columns(records: &[StatRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for record in records {
        for name in record.stats.keys() {
            if seen.insert(name.as_str()) {
                columns.push(name.clone());
            }
        }
    }
    columns
}

/// Header text for a stat column. A stat whose name shadows a scalar column
/// is written as `stats.<name>` so headers stay unique.
fn stat_header(name: &str) -> String {
    if SCALAR_COLUMNS.contains(&name) {
        format!("stats.{name}")
    } else {
        name.to_string()
    }
}

/// Cell text for one stat value.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Serialize `records` as CSV bytes with a header row.
pub fn to_csv_bytes(records: &[StatRecord]) -> Result<Vec<u8>> {
    let columns = stat_columns(records);
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let header: Vec<String> = SCALAR_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(columns.iter().map(|c| stat_header(c)))
        .collect();
    wtr.write_record(&header)?;

    for record in records {
        let row: Vec<String> = record
            .scalar_values()
            .into_iter()
            .chain(
                columns
                    .iter()
                    .map(|name| record.stats.get(name).map(render_value).unwrap_or_default()),
            )
            .collect();
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    wtr.into_inner()
        .map_err(|e| ScrapeError::Io(e.into_error()))
}
