//! Stable exit codes for roster CLI commands.

/// Command succeeded.
pub const OK: i32 = 0;
/// Command failed due to invalid layout/config/data or other errors.
pub const INVALID: i32 = 1;
/// The roster rejected the operation (duplicate, not eligible, not found, ...).
pub const REJECTED: i32 = 2;
