//! Deterministic, pure logic shared by the wrapper commands.
//!
//! Core modules must be free of I/O side effects. They operate on in-memory
//! data and return deterministic outputs suitable for tests.

pub mod backend;
pub mod command;
pub mod filter;
pub mod init_plan;
pub mod path;
pub mod settings;
