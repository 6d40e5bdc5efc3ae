//! Text rendering of roster projections.

use anyhow::Result;
use minijinja::{Environment, context};

use crate::core::view::{Dashboard, TeamCard};

const DASHBOARD_TEMPLATE: &str = include_str!("templates/dashboard.txt");
const TEAMS_TEMPLATE: &str = include_str!("templates/teams.txt");

/// Template engine wrapper around minijinja.
pub struct ViewRenderer {
    env: Environment<'static>,
}

impl Default for ViewRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template("dashboard", DASHBOARD_TEMPLATE)
            .expect("dashboard template should be valid");
        env.add_template("teams", TEAMS_TEMPLATE)
            .expect("teams template should be valid");
        Self { env }
    }

    pub fn render_dashboard(&self, dashboard: &Dashboard<'_>) -> Result<String> {
        let template = self.env.get_template("dashboard")?;
        Ok(template.render(dashboard)?)
    }

    pub fn render_teams(&self, cards: &[TeamCard<'_>]) -> Result<String> {
        let template = self.env.get_template("teams")?;
        Ok(template.render(context! { teams => cards })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::{SortOrder, ViewConfig, dashboard, team_cards};
    use crate::test_support::roster_with;

    #[test]
    fn dashboard_lists_rows_with_status() {
        let mut roster = roster_with(&[
            ("Bob", "bob@gmail.com", false),
            ("alice", "alice@gmail.com", true),
        ]);
        let team = roster.create_team("Crabs").expect("team");
        roster.add_to_team(team.id, "alice@gmail.com").expect("add");

        let config = ViewConfig::default();
        let out = ViewRenderer::new()
            .render_dashboard(&dashboard(&roster, &config))
            .expect("render");

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Participants: 2 | sorted A-Z");
        assert_eq!(
            lines[1],
            "[in]  alice <alice@gmail.com> | Web / Rust | Assigned"
        );
        assert_eq!(
            lines[2],
            "[out] Bob <bob@gmail.com> | Web / Rust | Not Assigned"
        );
    }

    #[test]
    fn dashboard_reports_empty_match() {
        let roster = roster_with(&[("Bob", "bob@gmail.com", false)]);
        let config = ViewConfig {
            search_text: "zzz".to_string(),
            filter_track: "Web".to_string(),
            sort_order: SortOrder::Desc,
        };
        let out = ViewRenderer::new()
            .render_dashboard(&dashboard(&roster, &config))
            .expect("render");

        assert!(out.starts_with("Participants: 1 | search \"zzz\" | track Web | sorted Z-A"));
        assert!(out.contains("No participants match."));
    }

    #[test]
    fn teams_show_members_and_eligible_candidates() {
        let mut roster = roster_with(&[
            ("Ada", "ada@gmail.com", true),
            ("Bob", "bob@gmail.com", true),
        ]);
        let crabs = roster.create_team("Crabs").expect("crabs");
        roster.create_team("Gophers").expect("gophers");
        roster.add_to_team(crabs.id, "ada@gmail.com").expect("add");

        let out = ViewRenderer::new()
            .render_teams(&team_cards(&roster))
            .expect("render");

        assert!(out.contains("[1] Crabs | members (1)"));
        assert!(out.contains("  - Ada <ada@gmail.com>"));
        assert!(out.contains("[2] Gophers | members (0)"));
        assert!(out.contains("  No members assigned yet."));
        assert!(out.contains("eligible: Bob (Rust) <bob@gmail.com>"));
    }

    #[test]
    fn teams_render_placeholder_when_empty() {
        let roster = roster_with(&[]);
        let out = ViewRenderer::new()
            .render_teams(&team_cards(&roster))
            .expect("render");
        assert_eq!(out.trim(), "No teams yet.");
    }
}
