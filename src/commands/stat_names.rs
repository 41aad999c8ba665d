//! Stat names command implementation

use std::{collections::BTreeMap, path::PathBuf};

use crate::{espn::stat_map::StatNameMap, Result};

/// Print the active stat id → name table.
pub fn handle_stat_names(stat_map: Option<PathBuf>, as_json: bool) -> Result<()> {
    let map = StatNameMap::from_optional_path(stat_map.as_deref())?;
    println!("{}", render_stat_names(&map, as_json)?);
    Ok(())
}

/// Text lines sorted numerically by id, or a JSON object.
pub fn render_stat_names(map: &StatNameMap, as_json: bool) -> Result<String> {
    if as_json {
        let table: BTreeMap<&str, &str> = map.entries().collect();
        return Ok(serde_json::to_string_pretty(&table)?);
    }

    let mut entries: Vec<(&str, &str)> = map.entries().collect();
    entries.sort_by_key(|(id, _)| (id.parse::<u32>().unwrap_or(u32::MAX), id.to_string()));

    Ok(entries
        .iter()
        .map(|(id, name)| format!("{id:>4}  {name}"))
        .collect::<Vec<_>>()
        .join("\n"))
}
