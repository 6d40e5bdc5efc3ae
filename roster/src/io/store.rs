//! Snapshot load/save with schema validation.
//!
//! Participants and teams persist as two independent JSON arrays, one file
//! each. A missing file loads as an empty collection.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::core::types::Snapshot;

const PARTICIPANTS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/roster/participants.v1.schema.json"
));
const TEAMS_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/roster/teams.v1.schema.json"
));

/// Persistence port for the roster collections.
pub trait Store {
    /// Last saved collections, or empty ones if nothing was saved yet.
    fn load(&self) -> Result<Snapshot>;

    fn save(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// Two JSON files on disk, written atomically (temp file + rename).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    participants_path: PathBuf,
    teams_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(participants_path: impl Into<PathBuf>, teams_path: impl Into<PathBuf>) -> Self {
        Self {
            participants_path: participants_path.into(),
            teams_path: teams_path.into(),
        }
    }
}

impl Store for JsonFileStore {
    fn load(&self) -> Result<Snapshot> {
        let participants = load_collection(&self.participants_path, PARTICIPANTS_SCHEMA)?;
        let teams = load_collection(&self.teams_path, TEAMS_SCHEMA)?;
        debug!(
            participants = participants.len(),
            teams = teams.len(),
            "roster loaded"
        );
        Ok(Snapshot {
            participants,
            teams,
        })
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        debug!(
            participants = snapshot.participants.len(),
            teams = snapshot.teams.len(),
            "writing roster"
        );
        write_collection(&self.participants_path, &snapshot.participants)?;
        write_collection(&self.teams_path, &snapshot.teams)
    }
}

/// In-process store; also counts saves so callers can observe persistence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    snapshot: Snapshot,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot, saves: 0 }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Store for MemoryStore {
    fn load(&self) -> Result<Snapshot> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.snapshot = snapshot.clone();
        self.saves += 1;
        Ok(())
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path, schema: &str) -> Result<Vec<T>> {
    if !path.exists() {
        debug!(path = %path.display(), "no saved collection");
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value: Value =
        serde_json::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    validate_schema(schema, &value).with_context(|| format!("validate {}", path.display()))?;
    serde_json::from_value(value).with_context(|| format!("deserialize {}", path.display()))
}

fn validate_schema(schema: &str, instance: &Value) -> Result<()> {
    let schema_value: Value = serde_json::from_str(schema).context("parse embedded schema")?;
    let compiled =
        validator_for(&schema_value).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(instance) {
        let messages = compiled
            .iter_errors(instance)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!("schema validation failed: {}", messages.join("; ")));
    }
    Ok(())
}

fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    let mut buf = serde_json::to_string_pretty(items).context("serialize collection")?;
    buf.push('\n');
    let parent = path
        .parent()
        .with_context(|| format!("collection path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, buf).with_context(|| format!("write temp {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TeamId;
    use crate::test_support::{participant, team};

    fn store_in(dir: &Path) -> JsonFileStore {
        JsonFileStore::new(dir.join("participants.json"), dir.join("teams.json"))
    }

    fn sample() -> Snapshot {
        let mut ada = participant(1, "Ada", "ada@gmail.com");
        ada.check_in = true;
        ada.team_id = Some(TeamId(3));
        Snapshot {
            participants: vec![ada, participant(2, "Bob", "bob@gmail.com")],
            teams: vec![team(3, "Crabs", &["ada@gmail.com"])],
        }
    }

    /// Verifies save → load returns structurally equal collections.
    #[test]
    fn save_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(temp.path());

        store.save(&sample()).expect("save");
        assert_eq!(store.load().expect("load"), sample());
    }

    #[test]
    fn missing_files_load_as_empty_collections() {
        let temp = tempfile::tempdir().expect("tempdir");
        let snapshot = store_in(temp.path()).load().expect("load");
        assert_eq!(snapshot, Snapshot::default());
    }

    /// Persisted field names keep the camelCase layout.
    #[test]
    fn participants_serialize_in_camel_case() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut store = store_in(temp.path());
        store.save(&sample()).expect("save");

        let contents = fs::read_to_string(temp.path().join("participants.json")).expect("read");
        for field in ["\"checkIn\": true", "\"teamId\": 3", "\"registeredAt\""] {
            assert!(contents.contains(field), "missing {field} in {contents}");
        }
        assert!(!temp.path().join("participants.json.tmp").exists());
    }

    #[test]
    fn schema_violations_are_reported() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(
            temp.path().join("teams.json"),
            r#"[{"id": 1, "name": "Crabs", "members": "ada@gmail.com"}]"#,
        )
        .expect("write");

        let err = store_in(temp.path()).load().expect_err("invalid");
        let message = format!("{err:#}");
        assert!(message.contains("schema validation failed"), "{message}");
        assert!(message.contains("teams.json"), "{message}");
    }

    #[test]
    fn memory_store_counts_saves() {
        let mut store = MemoryStore::new();
        assert_eq!(store.load().expect("load"), Snapshot::default());

        store.save(&sample()).expect("save");
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.snapshot(), &sample());
    }
}
