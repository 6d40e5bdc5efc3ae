//! Deterministic, pure logic for the roster.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! collections and return deterministic outputs suitable for tests; the clock
//! and the store are supplied by callers.

pub mod email;
pub mod error;
pub mod invariants;
pub mod roster;
pub mod types;
pub mod view;
