//! Cross-collection invariants not expressible via JSON Schema.

use std::collections::{HashMap, HashSet};

use crate::core::email::email_key;
use crate::core::types::{Snapshot, TeamId};

/// Check semantic invariants across both collections:
/// - Unique participant ids and emails (case-insensitive)
/// - Unique team ids and names (case-insensitive)
/// - `teamId` points at an existing team that lists the participant
/// - Team members exist, are checked in, and point back at the team
/// - A participant is listed at most once across all teams
/// - Checked-out participants are unassigned
pub fn validate_invariants(snapshot: &Snapshot) -> Vec<String> {
    let mut errors = Vec::new();

    let mut participant_ids = HashSet::new();
    let mut by_email = HashMap::new();
    for participant in &snapshot.participants {
        if !participant_ids.insert(participant.id) {
            errors.push(format!("duplicate participant id {}", participant.id));
        }
        if by_email
            .insert(email_key(&participant.email), participant)
            .is_some()
        {
            errors.push(format!("duplicate email '{}'", participant.email));
        }
        if !participant.check_in && participant.team_id.is_some() {
            errors.push(format!(
                "'{}': checked out but assigned to a team",
                participant.email
            ));
        }
    }

    let mut team_ids = HashSet::new();
    let mut team_names = HashSet::new();
    let mut owner: HashMap<String, TeamId> = HashMap::new();
    for team in &snapshot.teams {
        if !team_ids.insert(team.id) {
            errors.push(format!("duplicate team id {}", team.id));
        }
        if !team_names.insert(team.name.to_lowercase()) {
            errors.push(format!("duplicate team name '{}'", team.name));
        }
        for member in &team.members {
            let key = email_key(member);
            if let Some(previous) = owner.insert(key.clone(), team.id) {
                errors.push(format!(
                    "team {}: member '{}' already listed by team {}",
                    team.id, member, previous
                ));
            }
            match by_email.get(&key) {
                None => errors.push(format!("team {}: unknown member '{}'", team.id, member)),
                Some(participant) => {
                    if !participant.check_in {
                        errors.push(format!(
                            "team {}: member '{}' is not checked in",
                            team.id, member
                        ));
                    }
                    if participant.team_id != Some(team.id) {
                        errors.push(format!(
                            "team {}: member '{}' does not reference the team",
                            team.id, member
                        ));
                    }
                }
            }
        }
    }

    for participant in &snapshot.participants {
        let Some(team_id) = participant.team_id else {
            continue;
        };
        if !team_ids.contains(&team_id) {
            errors.push(format!(
                "'{}': references missing team {}",
                participant.email, team_id
            ));
        } else if owner.get(&email_key(&participant.email)) != Some(&team_id) {
            errors.push(format!(
                "'{}': team {} does not list the participant",
                participant.email, team_id
            ));
        }
    }

    errors
}
