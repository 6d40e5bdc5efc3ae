//! Initialization helpers for `.roster/` scaffolding.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::config::{RosterConfig, write_config};
use super::store::{JsonFileStore, Store};
use crate::core::types::Snapshot;

/// All canonical paths within `.roster/` for a project root.
#[derive(Debug, Clone)]
pub struct RosterPaths {
    pub root: PathBuf,
    pub roster_dir: PathBuf,
    pub config_path: PathBuf,
    pub participants_path: PathBuf,
    pub teams_path: PathBuf,
}

impl RosterPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let roster_dir = root.join(".roster");
        Self {
            root: root.clone(),
            roster_dir: roster_dir.clone(),
            config_path: roster_dir.join("config.toml"),
            participants_path: roster_dir.join("participants.json"),
            teams_path: roster_dir.join("teams.json"),
        }
    }

    pub fn store(&self) -> JsonFileStore {
        JsonFileStore::new(&self.participants_path, &self.teams_path)
    }
}

/// Options for `init_roster`.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// If true, overwrite existing config and data files.
    pub force: bool,
}

/// Create `.roster/` with a default config and empty collections.
///
/// Fails if `.roster/` already exists unless `options.force` is set.
pub fn init_roster(root: &Path, options: &InitOptions) -> Result<RosterPaths> {
    let paths = RosterPaths::new(root);
    if paths.roster_dir.exists() && !paths.roster_dir.is_dir() {
        return Err(anyhow!("roster init: .roster exists but is not a directory"));
    }
    if paths.roster_dir.exists() && !options.force {
        return Err(anyhow!(
            "roster init: .roster already exists (use --force to overwrite)"
        ));
    }

    fs::create_dir_all(&paths.roster_dir)
        .with_context(|| format!("create directory {}", paths.roster_dir.display()))?;
    write_config(&paths.config_path, &RosterConfig::default())?;
    paths.store().save(&Snapshot::default())?;

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_layout_with_empty_collections() {
        let temp = tempfile::tempdir().expect("tempdir");
        let paths = init_roster(temp.path(), &InitOptions { force: false }).expect("init");

        assert!(paths.config_path.is_file());
        assert_eq!(
            fs::read_to_string(&paths.participants_path).expect("read"),
            "[]\n"
        );
        assert_eq!(fs::read_to_string(&paths.teams_path).expect("read"), "[]\n");
        assert_eq!(paths.store().load().expect("load"), Snapshot::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        init_roster(temp.path(), &InitOptions { force: false }).expect("init");

        let err = init_roster(temp.path(), &InitOptions { force: false }).expect_err("exists");
        assert!(err.to_string().contains("already exists"));

        init_roster(temp.path(), &InitOptions { force: true }).expect("force");
    }
}
