//! I/O helpers for tfwrap commands.

pub mod git;
pub mod process;
pub mod settings;
pub mod workdir;
