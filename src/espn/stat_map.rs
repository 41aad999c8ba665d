//! ESPN baseball stat id → readable name mapping.
//!
//! ESPN keys every stat line by a numeric id (as a string). The built-in table
//! covers the common batting and pitching categories only; anything it does not
//! know keeps its raw id. Extra names can be layered on from a JSON file.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::{core::try_read_to_string, Result, ScrapeError};

/// Built-in stat ids. Not exhaustive; extend with `--stat-map`.
pub const BUILTIN_STAT_NAMES: &[(&str, &str)] = &[
    ("0", "AB"),
    ("1", "H"),
    ("2", "AVG"),
    ("3", "2B"),
    ("4", "3B"),
    ("5", "HR"),
    ("8", "TB"),
    ("9", "SLG"),
    ("10", "BB"),
    ("12", "HBP"),
    ("16", "PA"),
    ("17", "OBP"),
    ("18", "OPS"),
    ("20", "R"),
    ("21", "RBI"),
    ("23", "SB"),
    ("24", "CS"),
    ("27", "SO"),
    ("32", "GP"),
    ("33", "GS"),
    ("34", "OUTS"),
    ("37", "P_H"),
    ("39", "P_BB"),
    ("41", "WHIP"),
    ("44", "P_R"),
    ("45", "ER"),
    ("46", "P_HR"),
    ("47", "ERA"),
    ("48", "K"),
    ("53", "W"),
    ("54", "L"),
    ("57", "SV"),
    ("60", "HLD"),
    ("63", "QS"),
    ("83", "SVHD"),
];

/// Lookup table from stat id to name.
#[derive(Debug, Clone)]
pub struct StatNameMap {
    names: BTreeMap<String, String>,
}

impl Default for StatNameMap {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StatNameMap {
    /// The built-in table only.
    pub fn builtin() -> Self {
        let names = BUILTIN_STAT_NAMES
            .iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect();
        Self { names }
    }

    /// Built-in table with `overrides` layered on top (override wins).
    pub fn with_overrides(overrides: BTreeMap<String, String>) -> Self {
        let mut map = Self::builtin();
        map.names.extend(overrides);
        map
    }

    /// Built-in table plus the `{"<id>": "<name>"}` object stored at `path`.
    pub fn load_overrides(path: &Path) -> Result<Self> {
        let contents = try_read_to_string(path).ok_or_else(|| {
            ScrapeError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("could not read stat map {}", path.display()),
            ))
        })?;
        let overrides: BTreeMap<String, String> = serde_json::from_str(&contents)?;
        Ok(Self::with_overrides(overrides))
    }

    /// Optional variant used by the CLI: no path means the built-in table.
    pub fn from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_overrides(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn name_for(&self, stat_id: &str) -> Option<&str> {
        self.names.get(stat_id).map(String::as_str)
    }

    /// Rename every known key; unknown keys pass through untouched.
    /// Values are never inspected.
    pub fn map_stats(&self, raw: &BTreeMap<String, Value>) -> BTreeMap<String, Value> {
        raw.iter()
            .map(|(key, value)| {
                let name = self.name_for(key).unwrap_or(key.as_str());
                (name.to_string(), value.clone())
            })
            .collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.names.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn raw(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_home_runs_and_rbi_are_named() {
        let map = StatNameMap::builtin();
        let mapped = map.map_stats(&raw(&[("5", json!(2)), ("21", json!(1))]));

        let expected = raw(&[("HR", json!(2)), ("RBI", json!(1))]);
        assert_eq!(mapped, expected);
    }

    #[test]
    fn test_every_builtin_id_maps_to_its_name() {
        let map = StatNameMap::builtin();
        for (id, name) in BUILTIN_STAT_NAMES {
            let mapped = map.map_stats(&raw(&[(*id, json!(1))]));
            assert_eq!(mapped.keys().next().map(String::as_str), Some(*name));
        }
    }

    #[test]
    fn test_unknown_ids_pass_through() {
        let map = StatNameMap::builtin();
        let mapped = map.map_stats(&raw(&[("999", json!(4.5)), ("5", json!(1))]));

        assert_eq!(mapped.get("999"), Some(&json!(4.5)));
        assert_eq!(mapped.get("HR"), Some(&json!(1)));
        assert!(!mapped.contains_key("5"));
    }

    #[test]
    fn test_values_are_not_validated() {
        let map = StatNameMap::builtin();
        let mapped = map.map_stats(&raw(&[("2", json!("n/a")), ("47", Value::Null)]));

        assert_eq!(mapped.get("AVG"), Some(&json!("n/a")));
        assert_eq!(mapped.get("ERA"), Some(&Value::Null));
    }

    #[test]
    fn test_empty_stats_map_to_empty() {
        let map = StatNameMap::builtin();
        assert!(map.map_stats(&BTreeMap::new()).is_empty());
    }

    #[test]
    fn test_overrides_extend_and_replace() {
        let mut overrides = BTreeMap::new();
        overrides.insert("99".to_string(), "STARTER".to_string());
        overrides.insert("48".to_string(), "SO_P".to_string());

        let map = StatNameMap::with_overrides(overrides);
        assert_eq!(map.name_for("99"), Some("STARTER"));
        assert_eq!(map.name_for("48"), Some("SO_P"));
        assert_eq!(map.name_for("5"), Some("HR"));
        assert_eq!(map.len(), BUILTIN_STAT_NAMES.len() + 1);
    }

    #[test]
    fn test_load_overrides_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"81": "G"}}"#).unwrap();

        let map = StatNameMap::load_overrides(file.path()).unwrap();
        assert_eq!(map.name_for("81"), Some("G"));
    }

    #[test]
    fn test_load_overrides_missing_file() {
        let result = StatNameMap::load_overrides(Path::new("/definitely/not/here.json"));
        assert!(matches!(result, Err(ScrapeError::Io(_))));
    }

    #[test]
    fn test_load_overrides_rejects_non_object() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();

        let result = StatNameMap::load_overrides(file.path());
        assert!(matches!(result, Err(ScrapeError::Json(_))));
    }

    #[test]
    fn test_from_optional_path_none_is_builtin() {
        let map = StatNameMap::from_optional_path(None).unwrap();
        assert_eq!(map.len(), BUILTIN_STAT_NAMES.len());
        assert!(!map.is_empty());
    }
}
