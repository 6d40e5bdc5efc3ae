//! Event registration and team roster manager.
//!
//! Keeps participants and teams under `.roster/` in the project directory.
//! Every mutating command loads the roster, applies one operation, and saves.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use roster::core::invariants::validate_invariants;
use roster::core::types::{CheckInOutcome, Registration, TeamId};
use roster::core::view::{SortOrder, team_cards};
use roster::exit_codes;
use roster::io::config::load_config;
use roster::io::init::{InitOptions, RosterPaths, init_roster};
use roster::io::render::ViewRenderer;
use roster::io::store::{JsonFileStore, Store};
use roster::logging;
use roster::session::{Session, SessionError};

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Event registration and team roster manager"
)]
struct Cli {
    /// Project directory (contains .roster/).
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create `.roster/` with a default config and empty collections.
    Init {
        /// Overwrite existing files.
        #[arg(short, long)]
        force: bool,
    },
    /// Register a participant (gmail.com addresses only).
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        college: String,
        #[arg(long, default_value = "")]
        skill: String,
        #[arg(long, default_value = "")]
        track: String,
    },
    /// Toggle check-in. Checking out removes the participant from its team.
    CheckIn { email: String },
    /// Remove a participant, detaching it from its team first.
    Delete { email: String },
    /// Team management.
    Team {
        #[command(subcommand)]
        command: TeamCommand,
    },
    /// Show the participant dashboard.
    List {
        /// Case-insensitive match on name or email.
        #[arg(long, default_value = "")]
        search: String,
        /// Exact track filter (overrides the configured default).
        #[arg(long)]
        track: Option<String>,
        /// Name sort order (overrides the configured default).
        #[arg(long, value_enum)]
        sort: Option<SortArg>,
        /// Print the projection as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show team cards with eligible candidates.
    Teams {
        /// Print the projection as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check stored data against schema and invariants.
    Validate,
}

#[derive(Subcommand)]
enum TeamCommand {
    /// Create an empty team.
    Create { name: String },
    /// Delete a team; its members are unassigned, not removed.
    Delete { id: u64 },
    /// Add a checked-in, unassigned participant to a team.
    Add { id: u64, email: String },
    /// Remove a participant from a team.
    Remove { id: u64, email: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Asc,
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Asc => SortOrder::Asc,
            SortArg::Desc => SortOrder::Desc,
        }
    }
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            exit_codes::INVALID
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let paths = RosterPaths::new(&cli.root);
    match cli.command {
        Command::Init { force } => cmd_init(&cli.root, force),
        Command::Validate => cmd_validate(&paths),
        Command::List {
            search,
            track,
            sort,
            json,
        } => cmd_list(&paths, search, track, sort, json),
        Command::Teams { json } => cmd_teams(&paths, json),
        Command::Register {
            name,
            email,
            college,
            skill,
            track,
        } => {
            let mut session = open_session(&paths)?;
            let registration = Registration {
                name,
                email,
                college,
                skill,
                track,
            };
            finish(session.register(registration), |p| {
                format!("registered {} <{}> (id {})", p.name, p.email, p.id)
            })
        }
        Command::CheckIn { email } => {
            let mut session = open_session(&paths)?;
            finish(session.toggle_check_in(&email), |change| {
                let name = &change.participant.name;
                match change.outcome {
                    CheckInOutcome::CheckedIn => format!("{name} is now checked in"),
                    CheckInOutcome::CheckedOut => format!("{name} is now checked out"),
                    CheckInOutcome::Unassigned { team_name, .. } => {
                        format!("{name} checked out and removed from team {team_name}")
                    }
                }
            })
        }
        Command::Delete { email } => {
            let mut session = open_session(&paths)?;
            finish(session.delete_participant(&email), |p| {
                format!("removed participant {}", p.email)
            })
        }
        Command::Team { command } => {
            let mut session = open_session(&paths)?;
            match command {
                TeamCommand::Create { name } => finish(session.create_team(&name), |team| {
                    format!("created team \"{}\" (id {})", team.name, team.id)
                }),
                TeamCommand::Delete { id } => finish(session.delete_team(TeamId(id)), |team| {
                    format!(
                        "deleted team \"{}\"; {} member(s) unassigned",
                        team.name,
                        team.members.len()
                    )
                }),
                TeamCommand::Add { id, email } => {
                    finish(session.add_to_team(TeamId(id), &email), |()| {
                        format!("added {email} to team {id}")
                    })
                }
                TeamCommand::Remove { id, email } => {
                    finish(session.remove_from_team(TeamId(id), &email), |()| {
                        format!("removed {email} from team {id}")
                    })
                }
            }
        }
    }
}

fn cmd_init(root: &Path, force: bool) -> Result<i32> {
    let paths = init_roster(root, &InitOptions { force })?;
    println!("initialized {}", paths.roster_dir.display());
    Ok(exit_codes::OK)
}

fn cmd_validate(paths: &RosterPaths) -> Result<i32> {
    ensure_layout(paths)?;
    load_config(&paths.config_path)?;
    let snapshot = paths.store().load()?;
    let errors = validate_invariants(&snapshot);
    if !errors.is_empty() {
        bail!("invariant violations:\n- {}", errors.join("\n- "));
    }
    println!(
        "ok: {} participant(s), {} team(s)",
        snapshot.participants.len(),
        snapshot.teams.len()
    );
    Ok(exit_codes::OK)
}

fn cmd_list(
    paths: &RosterPaths,
    search: String,
    track: Option<String>,
    sort: Option<SortArg>,
    json: bool,
) -> Result<i32> {
    let config = load_config(&paths.config_path)?;
    let session = open_session(paths)?;

    let mut view = config.view.to_view_config();
    view.search_text = search;
    if let Some(track) = track {
        view.filter_track = track;
    }
    if let Some(sort) = sort {
        view.sort_order = sort.into();
    }

    let dashboard = session.dashboard(&view);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&dashboard).context("serialize dashboard")?
        );
    } else {
        print!("{}", with_newline(ViewRenderer::new().render_dashboard(&dashboard)?));
    }
    Ok(exit_codes::OK)
}

fn cmd_teams(paths: &RosterPaths, json: bool) -> Result<i32> {
    let session = open_session(paths)?;
    let cards = team_cards(session.roster());
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&cards).context("serialize teams")?
        );
    } else {
        print!("{}", with_newline(ViewRenderer::new().render_teams(&cards)?));
    }
    Ok(exit_codes::OK)
}

fn open_session(paths: &RosterPaths) -> Result<Session<JsonFileStore>> {
    ensure_layout(paths)?;
    let config = load_config(&paths.config_path)?;
    Session::open(paths.store(), &config)
}

fn ensure_layout(paths: &RosterPaths) -> Result<()> {
    if !paths.roster_dir.is_dir() {
        bail!(
            "missing directory {} (run `roster init` first)",
            paths.roster_dir.display()
        );
    }
    Ok(())
}

/// Print the success message, or map a rejection to its exit code.
fn finish<T>(result: Result<T, SessionError>, message: impl FnOnce(T) -> String) -> Result<i32> {
    match result {
        Ok(value) => {
            println!("{}", message(value));
            Ok(exit_codes::OK)
        }
        Err(SessionError::Rejected(err)) => {
            eprintln!("{err}");
            Ok(exit_codes::REJECTED)
        }
        Err(err) => Err(err.into()),
    }
}

fn with_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
