//! Orchestration: run one roster operation, then persist.
//!
//! Each operation runs to completion on the in-memory engine before the store
//! is touched, so saves only ever see consistent state. Rejected operations
//! never save.

use anyhow::{Context, Result};
use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::error::RosterError;
use crate::core::roster::Roster;
use crate::core::types::{
    CheckInChange, CheckInOutcome, Participant, Registration, Team, TeamId,
};
use crate::core::view::{Dashboard, ViewConfig, dashboard};
use crate::io::config::RosterConfig;
use crate::io::store::Store;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The engine refused the operation; nothing changed.
    #[error(transparent)]
    Rejected(#[from] RosterError),

    /// The operation was applied in memory but could not be saved.
    #[error("persist roster")]
    Persist(#[source] anyhow::Error),
}

/// A roster engine bound to its store.
pub struct Session<S: Store> {
    roster: Roster,
    store: S,
    strict_persistence: bool,
}

impl<S: Store> Session<S> {
    /// Load collections from `store` and verify their invariants.
    pub fn open(store: S, config: &RosterConfig) -> Result<Self> {
        let snapshot = store.load().context("load roster")?;
        let roster = Roster::from_snapshot(snapshot)?;
        debug!(
            participants = roster.participant_count(),
            teams = roster.teams().len(),
            strict = config.strict_persistence,
            "session opened"
        );
        Ok(Self {
            roster,
            store,
            strict_persistence: config.strict_persistence,
        })
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn dashboard<'a>(&'a self, config: &'a ViewConfig) -> Dashboard<'a> {
        dashboard(&self.roster, config)
    }

    pub fn register(&mut self, registration: Registration) -> Result<Participant, SessionError> {
        let participant = self
            .roster
            .register(registration, Utc::now())
            .map_err(|err| rejected("register", err))?;
        info!(id = %participant.id, email = %participant.email, "participant registered");
        self.persist()?;
        Ok(participant)
    }

    pub fn toggle_check_in(&mut self, email: &str) -> Result<CheckInChange, SessionError> {
        let change = self
            .roster
            .toggle_check_in(email)
            .map_err(|err| rejected("check-in", err))?;
        let email = change.participant.email.as_str();
        match &change.outcome {
            CheckInOutcome::CheckedIn => info!(%email, "participant checked in"),
            CheckInOutcome::CheckedOut => info!(%email, "participant checked out"),
            CheckInOutcome::Unassigned { team_id, team_name } => info!(
                %email,
                %team_id,
                team = %team_name,
                "participant checked out and removed from team"
            ),
        }
        self.persist()?;
        Ok(change)
    }

    pub fn delete_participant(&mut self, email: &str) -> Result<Participant, SessionError> {
        let removed = self
            .roster
            .delete_participant(email)
            .map_err(|err| rejected("delete participant", err))?;
        info!(email = %removed.email, team_id = ?removed.team_id, "participant removed");
        self.persist()?;
        Ok(removed)
    }

    pub fn create_team(&mut self, name: &str) -> Result<Team, SessionError> {
        let team = self
            .roster
            .create_team(name)
            .map_err(|err| rejected("create team", err))?;
        info!(team_id = %team.id, name = %team.name, "team created");
        self.persist()?;
        Ok(team)
    }

    pub fn delete_team(&mut self, team_id: TeamId) -> Result<Team, SessionError> {
        let team = self
            .roster
            .delete_team(team_id)
            .map_err(|err| rejected("delete team", err))?;
        info!(%team_id, count = team.members.len(), "team deleted; members unassigned");
        self.persist()?;
        Ok(team)
    }

    pub fn add_to_team(&mut self, team_id: TeamId, email: &str) -> Result<(), SessionError> {
        self.roster
            .add_to_team(team_id, email)
            .map_err(|err| rejected("add to team", err))?;
        info!(%team_id, %email, "participant added to team");
        self.persist()
    }

    pub fn remove_from_team(&mut self, team_id: TeamId, email: &str) -> Result<(), SessionError> {
        self.roster
            .remove_from_team(team_id, email)
            .map_err(|err| rejected("remove from team", err))?;
        info!(%team_id, %email, "participant removed from team");
        self.persist()
    }

    fn persist(&mut self) -> Result<(), SessionError> {
        match self.store.save(&self.roster.snapshot()) {
            Ok(()) => Ok(()),
            Err(err) if self.strict_persistence => Err(SessionError::Persist(err)),
            Err(err) => {
                warn!(
                    error = %format!("{err:#}"),
                    "roster save failed; continuing with in-memory state"
                );
                Ok(())
            }
        }
    }
}

fn rejected(op: &'static str, err: RosterError) -> SessionError {
    debug!(op, error = %err, "operation rejected");
    SessionError::Rejected(err)
}
