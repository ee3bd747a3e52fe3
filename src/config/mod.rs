use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::sort::{multi_field, SortEntry, SortSpec};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Snapshot file to load instead of the built-in fixture data.
    pub snapshot: Option<PathBuf>,

    /// Default sort per section, applied when no persisted view state
    /// exists. Entries pass through untouched; the header-click transition
    /// is what ultimately bounds and de-duplicates a spec.
    #[serde(default)]
    pub sorts: BTreeMap<String, Vec<SortEntry>>,
}

impl Config {
    pub fn default_sort_for(&self, section: &str) -> Option<SortSpec> {
        self.sorts.get(section).map(|entries| multi_field(entries))
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SCRY_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("scry").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("scry").join("config.toml"));
    }

    directories::ProjectDirs::from("", "", "scry")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sort::SortDirection;

    #[test]
    fn test_parse_sorts_table() {
        let toml = r#"
            [sorts]
            blocks = [{ field = "number", direction = "desc" }]
            transactions = [
                { field = "block", direction = "desc" },
                { field = "value", direction = "desc" },
            ]
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        let blocks = config.default_sort_for("blocks").unwrap();
        assert_eq!(blocks.fields, vec!["number"]);
        assert_eq!(blocks.orders, vec![false]);

        let txs = config.default_sort_for("transactions").unwrap();
        assert_eq!(txs.fields, vec!["block", "value"]);
        assert!(txs.is_multi_field_sort());
        assert!(config.default_sort_for("names").is_none());
    }

    #[test]
    fn test_direction_rename() {
        let entry: SortEntry = toml::from_str("field = \"gas\"\ndirection = \"asc\"").unwrap();
        assert_eq!(entry.direction, SortDirection::Asc);
    }

    #[test]
    fn test_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.snapshot.is_none());
        assert!(config.sorts.is_empty());
    }
}
