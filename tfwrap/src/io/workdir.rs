//! Filesystem facts about a terraform working directory.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::TfwrapError;

/// Sentinel that opts a directory out of dynamic backend configuration.
pub const STATIC_MARKER: &str = ".static";
pub const LOCK_FILE: &str = ".terraform.lock.hcl";

#[derive(Debug, Clone)]
pub struct WorkDir {
    dir: PathBuf,
}

impl WorkDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn lock_file(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }

    pub fn lock_file_exists(&self) -> bool {
        self.lock_file().is_file()
    }

    pub fn is_static(&self) -> bool {
        self.dir.join(STATIC_MARKER).exists()
    }

    /// True if the directory holds at least one `*.tf` or `*.tf.json` file.
    pub fn has_config_files(&self) -> Result<bool> {
        let entries =
            fs::read_dir(&self.dir).with_context(|| format!("read {}", self.dir.display()))?;
        for entry in entries {
            let entry = entry.context("read entry")?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if (name.ends_with(".tf") || name.ends_with(".tf.json")) && entry.path().is_file() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn ensure_config_files(&self) -> Result<()> {
        if self.has_config_files()? {
            return Ok(());
        }
        Err(TfwrapError::NoConfigFiles {
            dir: self.dir.clone(),
        }
        .into())
    }

    /// Delete the provider lock file. Returns false if there was none.
    pub fn remove_lock_file(&self) -> Result<bool> {
        let path = self.lock_file();
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).with_context(|| format!("remove {}", path.display()))?;
        debug!(path = %path.display(), "lock file removed");
        Ok(true)
    }
}
