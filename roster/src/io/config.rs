//! Roster configuration stored under `.roster/config.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::view::{SortOrder, ViewConfig};

/// Roster configuration (TOML).
///
/// Missing fields default to the browser-era behavior: best-effort saves and
/// an ascending, unfiltered dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RosterConfig {
    /// Return save failures to the caller instead of logging them.
    ///
    /// In-memory state is kept either way.
    pub strict_persistence: bool,

    pub view: ViewDefaults,
}

/// Dashboard defaults applied when the caller does not override them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewDefaults {
    pub sort_order: SortOrder,
    /// Empty shows every track.
    pub track: String,
}

impl ViewDefaults {
    pub fn to_view_config(&self) -> ViewConfig {
        ViewConfig {
            search_text: String::new(),
            filter_track: self.track.clone(),
            sort_order: self.sort_order,
        }
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `RosterConfig::default()`.
pub fn load_config(path: &Path) -> Result<RosterConfig> {
    if !path.exists() {
        return Ok(RosterConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &RosterConfig) -> Result<()> {
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
