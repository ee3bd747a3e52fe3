//! Per-view UI state persisted between runs
//!
//! Currently just the sort spec for each section, stored as JSON in the
//! platform data directory. Loading is tolerant: missing or unreadable
//! state starts fresh rather than failing startup.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::domain::sort::SortSpec;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewState {
    #[serde(default)]
    pub sorts: BTreeMap<String, SortSpec>,
}

impl ViewState {
    pub fn sort_for(&self, section: &str) -> Option<&SortSpec> {
        self.sorts.get(section)
    }

    pub fn set_sort(&mut self, section: &str, spec: SortSpec) {
        if spec.is_empty_sort() {
            self.sorts.remove(section);
        } else {
            self.sorts.insert(section.to_string(), spec);
        }
    }
}

pub fn state_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SCRY_STATE").map(PathBuf::from) {
        return Some(path);
    }
    let dirs = directories::ProjectDirs::from("", "", "scry")?;
    Some(dirs.data_dir().join("view_state.json"))
}

pub fn load(path: &Path) -> ViewState {
    let Ok(content) = fs::read_to_string(path) else {
        return ViewState::default();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

pub fn save(path: &Path, state: &ViewState) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create state dir {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json).with_context(|| format!("write state {}", path.display()))?;
    Ok(())
}
