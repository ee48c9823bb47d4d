//! Classified failures that map to distinct exit codes.
//!
//! Everything is still propagated as `anyhow::Error`; `main` downcasts to
//! [`TfwrapError`] once to choose the exit code.

use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

#[derive(Error, Debug)]
pub enum TfwrapError {
    #[error("settings file not found or unreadable: {}", .path.display())]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings file {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid settings: {0}")]
    ConfigInvalid(String),

    #[error("only the s3 backend is supported: add an [init.s3] section to the settings file")]
    UnsupportedBackend,

    #[error("no terraform configuration files (*.tf, *.tf.json) in {}", .dir.display())]
    NoConfigFiles { dir: PathBuf },

    #[error("not inside a git repository ({}): {stderr}", .dir.display())]
    RepositoryNotFound { dir: PathBuf, stderr: String },

    #[error("`{command}` exited with status {}", .code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    Subprocess { command: String, code: Option<i32> },
}

impl TfwrapError {
    /// Exit code the CLI reports for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigNotFound { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigInvalid(_)
            | Self::UnsupportedBackend => exit_codes::CONFIG,
            Self::NoConfigFiles { .. } => exit_codes::NO_CONFIG_FILES,
            Self::RepositoryNotFound { .. } => exit_codes::NOT_A_REPOSITORY,
            Self::Subprocess { code, .. } => match code {
                Some(c) if *c != exit_codes::OK => *c,
                _ => exit_codes::FAILURE,
            },
        }
    }
}

/// Exit code for any error chain, falling back to [`exit_codes::FAILURE`].
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<TfwrapError>())
        .map_or(exit_codes::FAILURE, TfwrapError::exit_code)
}
