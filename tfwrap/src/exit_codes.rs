//! Stable exit codes for tfwrap commands.
//!
//! A failing terraform invocation exits with terraform's own code instead.

/// Command succeeded.
pub const OK: i32 = 0;
/// Generic failure (I/O errors, child killed by a signal, etc.).
pub const FAILURE: i32 = 1;
/// Settings file missing, malformed, or without a supported backend.
pub const CONFIG: i32 = 2;
/// The working directory holds no terraform configuration files.
pub const NO_CONFIG_FILES: i32 = 3;
/// The working directory is not inside a git repository.
pub const NOT_A_REPOSITORY: i32 = 4;
