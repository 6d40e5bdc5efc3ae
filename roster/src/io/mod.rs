//! I/O helpers for roster commands.

pub mod config;
pub mod init;
pub mod render;
pub mod store;
