//! Event registration and team-formation roster.
//!
//! The crate keeps participant check-in status, team membership and team
//! rosters mutually consistent. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (validation, the roster engine,
//!   invariants, projections). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, JSON store, rendering).
//!
//! [`session`] binds the engine to a store and persists after every
//! successful mutation; the `roster` binary drives it from the command line.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
