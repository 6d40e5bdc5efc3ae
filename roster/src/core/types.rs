//! Shared deterministic types for the roster core.
//!
//! Field names serialize in camelCase so persisted collections keep the
//! `checkIn` / `teamId` / `registeredAt` layout of the browser-era data files.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier for a registered participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub u64);

/// Stable identifier for a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u64);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Stored as entered; uniqueness is case-insensitive.
    pub email: String,
    pub college: String,
    pub skill: String,
    pub track: String,
    pub check_in: bool,
    pub team_id: Option<TeamId>,
    pub registered_at: DateTime<Utc>,
}

impl Participant {
    /// Checked in and not on any team.
    pub fn is_eligible(&self) -> bool {
        self.check_in && self.team_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Member emails in add order.
    pub members: Vec<String>,
}

/// Raw registration form input. Trimming happens in the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub college: String,
    pub skill: String,
    pub track: String,
}

/// Both collections as exchanged with a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub participants: Vec<Participant>,
    pub teams: Vec<Team>,
}

/// What a check-in toggle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    CheckedIn,
    /// Checked out while unassigned.
    CheckedOut,
    /// Checked out and removed from `team_id`.
    Unassigned { team_id: TeamId, team_name: String },
}

/// Participant state after a toggle, together with what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInChange {
    pub participant: Participant,
    pub outcome: CheckInOutcome,
}
