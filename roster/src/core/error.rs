//! Rejections raised by roster operations.
//!
//! Every rejection is recoverable: the engine performs all checks before it
//! mutates anything, so a returned error means state is unchanged.

use thiserror::Error;

use crate::core::types::TeamId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("registration restricted to @gmail.com addresses: '{email}'")]
    InvalidDomain { email: String },

    #[error("email '{email}' is already registered")]
    DuplicateEmail { email: String },

    #[error("team name cannot be empty")]
    EmptyTeamName,

    #[error("team name '{name}' already exists")]
    DuplicateTeamName { name: String },

    #[error("participant '{email}' must be checked in first")]
    NotEligible { email: String },

    #[error("participant '{email}' is already in team {team_id}")]
    AlreadyAssigned { email: String, team_id: TeamId },

    #[error("participant '{email}' not found")]
    ParticipantNotFound { email: String },

    #[error("team {team_id} not found")]
    TeamNotFound { team_id: TeamId },

    #[error("participant '{email}' is not a member of team {team_id}")]
    NotAMember { email: String, team_id: TeamId },

    #[error("no {collection} ids left to assign")]
    IdsExhausted { collection: &'static str },
}

/// Coarse classification of a [`RosterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidDomain,
    DuplicateEmail,
    EmptyName,
    DuplicateName,
    NotEligible,
    AlreadyAssigned,
    NotFound,
    IdsExhausted,
}

impl RosterError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidDomain { .. } => ErrorKind::InvalidDomain,
            Self::DuplicateEmail { .. } => ErrorKind::DuplicateEmail,
            Self::EmptyTeamName => ErrorKind::EmptyName,
            Self::DuplicateTeamName { .. } => ErrorKind::DuplicateName,
            Self::NotEligible { .. } => ErrorKind::NotEligible,
            Self::AlreadyAssigned { .. } => ErrorKind::AlreadyAssigned,
            Self::ParticipantNotFound { .. }
            | Self::TeamNotFound { .. }
            | Self::NotAMember { .. } => ErrorKind::NotFound,
            Self::IdsExhausted { .. } => ErrorKind::IdsExhausted,
        }
    }
}

/// Loaded data that breaks one or more roster invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("roster invariants failed: {}", .0.join("; "))]
pub struct InvariantViolations(pub Vec<String>);
