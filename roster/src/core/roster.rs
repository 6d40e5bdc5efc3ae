//! The roster engine: participants, teams, and the transitions that keep them
//! consistent.
//!
//! All checks run before any mutation, so a rejected operation never leaves
//! partial state behind. Team membership is keyed by email; lookups go through
//! an index keyed by the lowercased email.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::core::email::{email_key, is_allowed_email};
use crate::core::error::{InvariantViolations, RosterError};
use crate::core::invariants::validate_invariants;
use crate::core::types::{
    CheckInChange, CheckInOutcome, Participant, ParticipantId, Registration, Snapshot, Team,
    TeamId,
};

#[derive(Debug, Clone)]
pub struct Roster {
    /// Registration order, keyed by `email_key`.
    participants: IndexMap<String, Participant>,
    /// Creation order.
    teams: IndexMap<TeamId, Team>,
    next_participant_id: u64,
    next_team_id: u64,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            participants: IndexMap::new(),
            teams: IndexMap::new(),
            next_participant_id: 1,
            next_team_id: 1,
        }
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an engine from stored collections.
    ///
    /// Id sequences resume after the largest stored id.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, InvariantViolations> {
        let mut errors = validate_invariants(&snapshot);
        let next_participant_id = next_id(
            snapshot.participants.iter().map(|p| p.id.0),
            "participant",
            &mut errors,
        );
        let next_team_id = next_id(snapshot.teams.iter().map(|t| t.id.0), "team", &mut errors);
        if !errors.is_empty() {
            return Err(InvariantViolations(errors));
        }

        Ok(Self {
            participants: snapshot
                .participants
                .into_iter()
                .map(|p| (email_key(&p.email), p))
                .collect(),
            teams: snapshot.teams.into_iter().map(|t| (t.id, t)).collect(),
            next_participant_id,
            next_team_id,
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            participants: self.participants.values().cloned().collect(),
            teams: self.teams.values().cloned().collect(),
        }
    }

    pub fn participants(&self) -> impl ExactSizeIterator<Item = &Participant> {
        self.participants.values()
    }

    pub fn teams(&self) -> impl ExactSizeIterator<Item = &Team> {
        self.teams.values()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Case-insensitive lookup by email.
    pub fn participant(&self, email: &str) -> Option<&Participant> {
        self.participants.get(&email_key(email))
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.get(&team_id)
    }

    pub fn check_invariants(&self) -> Vec<String> {
        validate_invariants(&self.snapshot())
    }

    /// Register a new participant (checked out, unassigned).
    ///
    /// `name`, `email` and `college` are trimmed before validation.
    pub fn register(
        &mut self,
        registration: Registration,
        registered_at: DateTime<Utc>,
    ) -> Result<Participant, RosterError> {
        let email = registration.email.trim().to_string();
        if !is_allowed_email(&email) {
            return Err(RosterError::InvalidDomain { email });
        }
        let key = email_key(&email);
        if self.participants.contains_key(&key) {
            return Err(RosterError::DuplicateEmail { email });
        }
        let following = advance(self.next_participant_id, "participant")?;

        let participant = Participant {
            id: ParticipantId(self.next_participant_id),
            name: registration.name.trim().to_string(),
            email,
            college: registration.college.trim().to_string(),
            skill: registration.skill,
            track: registration.track,
            check_in: false,
            team_id: None,
            registered_at,
        };
        self.next_participant_id = following;
        self.participants.insert(key, participant.clone());
        Ok(participant)
    }

    /// Flip check-in. Checking out always drops the participant from its team.
    pub fn toggle_check_in(&mut self, email: &str) -> Result<CheckInChange, RosterError> {
        let key = email_key(email);
        let participant =
            self.participants
                .get_mut(&key)
                .ok_or_else(|| RosterError::ParticipantNotFound {
                    email: email.to_string(),
                })?;

        participant.check_in = !participant.check_in;
        let outcome = if participant.check_in {
            CheckInOutcome::CheckedIn
        } else {
            match participant.team_id.take() {
                None => CheckInOutcome::CheckedOut,
                Some(team_id) => match self.teams.get_mut(&team_id) {
                    Some(team) => {
                        team.members.retain(|member| email_key(member) != key);
                        CheckInOutcome::Unassigned {
                            team_id,
                            team_name: team.name.clone(),
                        }
                    }
                    None => CheckInOutcome::CheckedOut,
                },
            }
        };

        Ok(CheckInChange {
            participant: participant.clone(),
            outcome,
        })
    }

    /// Create an empty team. The name is trimmed and must be unique
    /// case-insensitively.
    pub fn create_team(&mut self, name: &str) -> Result<Team, RosterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyTeamName);
        }
        let folded = name.to_lowercase();
        if self.teams.values().any(|t| t.name.to_lowercase() == folded) {
            return Err(RosterError::DuplicateTeamName {
                name: name.to_string(),
            });
        }
        let following = advance(self.next_team_id, "team")?;

        let team = Team {
            id: TeamId(self.next_team_id),
            name: name.to_string(),
            members: Vec::new(),
        };
        self.next_team_id = following;
        self.teams.insert(team.id, team.clone());
        Ok(team)
    }

    /// Detach every member, then remove the team. Members are not deleted.
    pub fn delete_team(&mut self, team_id: TeamId) -> Result<Team, RosterError> {
        let team = self
            .teams
            .shift_remove(&team_id)
            .ok_or(RosterError::TeamNotFound { team_id })?;

        for member in &team.members {
            if let Some(participant) = self.participants.get_mut(&email_key(member)) {
                participant.team_id = None;
            }
        }
        Ok(team)
    }

    /// Append an eligible participant to a team.
    ///
    /// Checked in order: participant exists, team exists, participant is
    /// checked in, participant is unassigned.
    pub fn add_to_team(&mut self, team_id: TeamId, email: &str) -> Result<(), RosterError> {
        let key = email_key(email);
        let participant =
            self.participants
                .get_mut(&key)
                .ok_or_else(|| RosterError::ParticipantNotFound {
                    email: email.to_string(),
                })?;
        let team = self
            .teams
            .get_mut(&team_id)
            .ok_or(RosterError::TeamNotFound { team_id })?;

        if !participant.check_in {
            return Err(RosterError::NotEligible {
                email: participant.email.clone(),
            });
        }
        if let Some(current) = participant.team_id {
            return Err(RosterError::AlreadyAssigned {
                email: participant.email.clone(),
                team_id: current,
            });
        }

        participant.team_id = Some(team_id);
        team.members.push(participant.email.clone());
        Ok(())
    }

    /// Remove a participant from the team it belongs to. No check-in
    /// requirement.
    pub fn remove_from_team(&mut self, team_id: TeamId, email: &str) -> Result<(), RosterError> {
        let key = email_key(email);
        let participant =
            self.participants
                .get_mut(&key)
                .ok_or_else(|| RosterError::ParticipantNotFound {
                    email: email.to_string(),
                })?;
        let team = self
            .teams
            .get_mut(&team_id)
            .ok_or(RosterError::TeamNotFound { team_id })?;
        if participant.team_id != Some(team_id) {
            return Err(RosterError::NotAMember {
                email: participant.email.clone(),
                team_id,
            });
        }

        participant.team_id = None;
        team.members.retain(|member| email_key(member) != key);
        Ok(())
    }

    /// Detach from any team, then drop the participant.
    pub fn delete_participant(&mut self, email: &str) -> Result<Participant, RosterError> {
        let key = email_key(email);
        let team_id = self
            .participants
            .get(&key)
            .ok_or_else(|| RosterError::ParticipantNotFound {
                email: email.to_string(),
            })?
            .team_id;

        if let Some(team) = team_id.and_then(|id| self.teams.get_mut(&id)) {
            team.members.retain(|member| email_key(member) != key);
        }
        self.participants
            .shift_remove(&key)
            .ok_or_else(|| RosterError::ParticipantNotFound {
                email: email.to_string(),
            })
    }
}

/// First free id after the largest stored one; 1 for an empty collection.
fn next_id(ids: impl Iterator<Item = u64>, collection: &str, errors: &mut Vec<String>) -> u64 {
    match ids.max() {
        None => 1,
        Some(max) => max.checked_add(1).unwrap_or_else(|| {
            errors.push(format!("{collection} id sequence exhausted at {max}"));
            max
        }),
    }
}

fn advance(id: u64, collection: &'static str) -> Result<u64, RosterError> {
    id.checked_add(1).ok_or(RosterError::IdsExhausted { collection })
}
