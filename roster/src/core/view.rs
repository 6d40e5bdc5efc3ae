//! Read-only projections for presentation.
//!
//! Nothing here mutates the roster; every view is recomputed from the current
//! collections on demand.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::core::roster::Roster;
use crate::core::types::{Participant, Team};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Dashboard filter and sort controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewConfig {
    /// Case-insensitive substring matched against name or email.
    pub search_text: String,
    /// Exact track match; empty matches every track.
    pub filter_track: String,
    pub sort_order: SortOrder,
}

impl ViewConfig {
    fn matches(&self, participant: &Participant, needle: &str) -> bool {
        let matches_search = participant.name.to_lowercase().contains(needle)
            || participant.email.to_lowercase().contains(needle);
        let matches_track =
            self.filter_track.is_empty() || participant.track == self.filter_track;
        matches_search && matches_track
    }
}

/// Filter by search text and track, then sort by name.
///
/// The sort is stable: equal names keep their input order.
pub fn filter_sort<'a, I>(participants: I, config: &ViewConfig) -> Vec<&'a Participant>
where
    I: IntoIterator<Item = &'a Participant>,
{
    let needle = config.search_text.to_lowercase();
    let mut rows: Vec<&Participant> = participants
        .into_iter()
        .filter(|p| config.matches(p, &needle))
        .collect();
    rows.sort_by(|a, b| match config.sort_order {
        SortOrder::Asc => collate(&a.name, &b.name),
        SortOrder::Desc => collate(&b.name, &a.name),
    });
    rows
}

/// Checked-in, unassigned participants in registration order.
pub fn eligible<'a, I>(participants: I) -> impl Iterator<Item = &'a Participant>
where
    I: IntoIterator<Item = &'a Participant>,
{
    participants.into_iter().filter(|p| p.is_eligible())
}

/// Locale-style name ordering.
///
/// Names compare by their base letters first, ignoring case and accents, so
/// `Émile` sorts with the `e`s. Ties fall back to accents (unaccented first),
/// then to case (lowercase first).
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.chars().map(case_rank).cmp(b.chars().map(case_rank)))
        .then_with(|| a.cmp(b))
}

fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() { 1 } else { 0 }
}

/// One team with its resolved members and add-to-team candidates.
#[derive(Debug, Clone, Serialize)]
pub struct TeamCard<'a> {
    pub team: &'a Team,
    /// Members resolved to participants, in add order.
    pub members: Vec<&'a Participant>,
    pub member_count: usize,
    pub eligible: Vec<&'a Participant>,
}

/// Everything a dashboard render needs.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard<'a> {
    pub total_count: usize,
    pub search_text: &'a str,
    pub filter_track: &'a str,
    pub sort_order: SortOrder,
    pub rows: Vec<&'a Participant>,
    pub teams: Vec<TeamCard<'a>>,
}

pub fn team_cards(roster: &Roster) -> Vec<TeamCard<'_>> {
    let candidates: Vec<&Participant> = eligible(roster.participants()).collect();
    roster
        .teams()
        .map(|team| {
            let members: Vec<&Participant> = team
                .members
                .iter()
                .filter_map(|email| roster.participant(email))
                .collect();
            TeamCard {
                team,
                member_count: team.members.len(),
                members,
                eligible: candidates.clone(),
            }
        })
        .collect()
}

pub fn dashboard<'a>(roster: &'a Roster, config: &'a ViewConfig) -> Dashboard<'a> {
    Dashboard {
        total_count: roster.participant_count(),
        search_text: &config.search_text,
        filter_track: &config.filter_track,
        sort_order: config.sort_order,
        rows: filter_sort(roster.participants(), config),
        teams: team_cards(roster),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{participant, roster_with};

    fn names(rows: &[&Participant]) -> Vec<String> {
        rows.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn sorts_names_case_insensitively() {
        let people = vec![
            participant(1, "Bob", "bob@gmail.com"),
            participant(2, "alice", "alice@gmail.com"),
        ];

        let asc = filter_sort(&people, &ViewConfig::default());
        assert_eq!(names(&asc), vec!["alice", "Bob"]);

        let desc = filter_sort(
            &people,
            &ViewConfig {
                sort_order: SortOrder::Desc,
                ..ViewConfig::default()
            },
        );
        assert_eq!(names(&desc), vec!["Bob", "alice"]);
    }

    #[test]
    fn lowercase_sorts_before_uppercase_on_case_only_difference() {
        assert_eq!(collate("ada", "Ada"), Ordering::Less);
        assert_eq!(collate("Ada", "ada"), Ordering::Greater);
        assert_eq!(collate("Ada", "Ada"), Ordering::Equal);
        assert_eq!(collate("ada", "Adam"), Ordering::Less);
    }

    #[test]
    fn accented_names_sort_with_their_base_letters() {
        let people = vec![
            participant(1, "Zoe", "zoe@gmail.com"),
            participant(2, "Émile", "emile.a@gmail.com"),
            participant(3, "Emile", "emile.b@gmail.com"),
            participant(4, "Ángel", "angel@gmail.com"),
            participant(5, "Bruno", "bruno@gmail.com"),
        ];

        let rows = filter_sort(&people, &ViewConfig::default());
        assert_eq!(names(&rows), vec!["Ángel", "Bruno", "Emile", "Émile", "Zoe"]);

        assert_eq!(collate("émile", "Émile"), Ordering::Less);
        assert_eq!(collate("Émile", "Emilia"), Ordering::Less);
    }

    #[test]
    fn equal_names_keep_input_order() {
        let people = vec![
            participant(1, "Sam", "sam.one@gmail.com"),
            participant(2, "Sam", "sam.two@gmail.com"),
        ];
        let rows = filter_sort(&people, &ViewConfig::default());
        assert_eq!(rows[0].id, people[0].id);
        assert_eq!(rows[1].id, people[1].id);
    }

    #[test]
    fn search_matches_name_or_email_case_insensitively() {
        let people = vec![
            participant(1, "Bob", "robert@gmail.com"),
            participant(2, "Alice", "alice.bo@gmail.com"),
            participant(3, "Carol", "carol@gmail.com"),
        ];
        let rows = filter_sort(
            &people,
            &ViewConfig {
                search_text: "BO".to_string(),
                ..ViewConfig::default()
            },
        );
        assert_eq!(names(&rows), vec!["Alice", "Bob"]);
    }

    #[test]
    fn track_filter_is_exact() {
        let mut web = participant(1, "Ada", "ada@gmail.com");
        web.track = "Web".to_string();
        let mut ai = participant(2, "Bob", "bob@gmail.com");
        ai.track = "AI/ML".to_string();
        let people = vec![web, ai];

        let config = ViewConfig {
            filter_track: "Web".to_string(),
            ..ViewConfig::default()
        };
        assert_eq!(names(&filter_sort(&people, &config)), vec!["Ada"]);

        let config = ViewConfig {
            filter_track: "web".to_string(),
            ..ViewConfig::default()
        };
        assert!(filter_sort(&people, &config).is_empty());
    }

    #[test]
    fn sort_order_toggles() {
        assert_eq!(SortOrder::Asc.toggled(), SortOrder::Desc);
        assert_eq!(SortOrder::Desc.toggled(), SortOrder::Asc);
    }

    #[test]
    fn team_cards_list_members_and_shared_eligible_candidates() {
        let mut roster = roster_with(&[
            ("Ada", "ada@gmail.com", true),
            ("Bob", "bob@gmail.com", true),
            ("Cy", "cy@gmail.com", false),
        ]);
        let crabs = roster.create_team("Crabs").expect("crabs");
        roster.create_team("Gophers").expect("gophers");
        roster.add_to_team(crabs.id, "ada@gmail.com").expect("add");

        let cards = team_cards(&roster);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].team.name, "Crabs");
        assert_eq!(cards[0].member_count, 1);
        assert_eq!(names(&cards[0].members), vec!["Ada"]);
        for card in &cards {
            assert_eq!(names(&card.eligible), vec!["Bob"]);
        }
    }

    #[test]
    fn dashboard_counts_every_participant_regardless_of_filter() {
        let roster = roster_with(&[
            ("Ada", "ada@gmail.com", false),
            ("Bob", "bob@gmail.com", false),
        ]);
        let config = ViewConfig {
            search_text: "ada".to_string(),
            ..ViewConfig::default()
        };

        let view = dashboard(&roster, &config);
        assert_eq!(view.total_count, 2);
        assert_eq!(names(&view.rows), vec!["Ada"]);
        assert!(view.teams.is_empty());
    }
}
