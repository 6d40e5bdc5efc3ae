//! Test-only helpers for building participants, teams, and rosters.

use std::path::Path;

use anyhow::{Result, anyhow};
use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use crate::core::roster::Roster;
use crate::core::types::{Participant, ParticipantId, Registration, Snapshot, Team, TeamId};
use crate::io::init::{InitOptions, RosterPaths, init_roster};
use crate::io::store::Store;

/// Deterministic timestamp `secs` seconds after a fixed epoch.
pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0)
        .single()
        .expect("valid timestamp")
}

/// Registration form with fixed college/skill/track.
pub fn registration(name: &str, email: &str) -> Registration {
    Registration {
        name: name.to_string(),
        email: email.to_string(),
        college: "State College".to_string(),
        skill: "Rust".to_string(),
        track: "Web".to_string(),
    }
}

/// Checked-out, unassigned participant with deterministic fields.
pub fn participant(id: u64, name: &str, email: &str) -> Participant {
    Participant {
        id: ParticipantId(id),
        name: name.to_string(),
        email: email.to_string(),
        college: "State College".to_string(),
        skill: "Rust".to_string(),
        track: "Web".to_string(),
        check_in: false,
        team_id: None,
        registered_at: at(id as i64),
    }
}

pub fn team(id: u64, name: &str, members: &[&str]) -> Team {
    Team {
        id: TeamId(id),
        name: name.to_string(),
        members: members.iter().map(|m| m.to_string()).collect(),
    }
}

/// Register `(name, email, checked_in)` entries in order.
pub fn roster_with(entries: &[(&str, &str, bool)]) -> Roster {
    let mut roster = Roster::new();
    for (offset, (name, email, checked_in)) in entries.iter().enumerate() {
        roster
            .register(registration(name, email), at(offset as i64))
            .expect("register fixture");
        if *checked_in {
            roster.toggle_check_in(email).expect("check in fixture");
        }
    }
    roster
}

/// Store whose saves always fail; loads are empty.
#[derive(Debug, Default)]
pub struct FailingStore;

impl Store for FailingStore {
    fn load(&self) -> Result<Snapshot> {
        Ok(Snapshot::default())
    }

    fn save(&mut self, _snapshot: &Snapshot) -> Result<()> {
        Err(anyhow!("disk full"))
    }
}

/// Temporary project directory with an initialized `.roster/`.
pub struct TestProject {
    dir: TempDir,
    paths: RosterPaths,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir()?;
        let paths = init_roster(dir.path(), &InitOptions { force: false })?;
        Ok(Self { dir, paths })
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> &RosterPaths {
        &self.paths
    }
}
