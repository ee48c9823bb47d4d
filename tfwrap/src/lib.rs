//! Terraform wrapper for repositories holding many independently initialized
//! modules.
//!
//! Every module in the repository gets the same backend configuration, with
//! the remote state key derived from the module's path, the same provider lock
//! platforms, and plan/apply output with known noisy blocks elided.
//!
//! - **[`core`]**: Pure, deterministic logic (argument building, output
//!   filtering, path ids, step planning). No I/O.
//! - **[`io`]**: Side-effecting operations (settings file, git, process
//!   execution). Isolated behind [`io::process::ToolRunner`] for tests.
//!
//! Orchestration modules ([`init`], [`lock`], [`run`]) coordinate core logic
//! with I/O to implement CLI commands.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod init;
pub mod io;
pub mod lock;
pub mod logging;
pub mod run;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
