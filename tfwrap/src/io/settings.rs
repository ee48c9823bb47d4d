//! Settings loading and working-directory resolution.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, instrument};

use crate::core::path::relative_path_id;
use crate::core::settings::{SETTINGS_FILE, Settings};
use crate::error::TfwrapError;
use crate::io::git::Git;

/// Everything a command needs to know about where it runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub root: PathBuf,
    pub workdir: PathBuf,
    /// `/`-separated path of `workdir` relative to `root`.
    pub path_id: String,
    pub settings: Settings,
}

/// Load and validate `<root>/tfwrap.toml`.
///
/// A missing file is an error; there is no sensible default backend.
pub fn load_settings(root: &Path) -> Result<Settings> {
    let path = root.join(SETTINGS_FILE);
    let contents = fs::read_to_string(&path).map_err(|source| TfwrapError::ConfigNotFound {
        path: path.clone(),
        source,
    })?;
    let settings = Settings::from_toml(&contents).map_err(|source| TfwrapError::ConfigParse {
        path: path.clone(),
        source,
    })?;
    settings.validate()?;
    debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

/// Resolve `workdir` against an explicit repository root (no subprocess).
pub fn resolve_with_root(root: &Path, workdir: &Path) -> Result<Resolved> {
    let root = root
        .canonicalize()
        .with_context(|| format!("canonicalize {}", root.display()))?;
    let workdir = workdir
        .canonicalize()
        .with_context(|| format!("canonicalize {}", workdir.display()))?;
    let path_id = relative_path_id(&root, &workdir)?;
    let settings = load_settings(&root)?;
    Ok(Resolved {
        root,
        workdir,
        path_id,
        settings,
    })
}

/// Locate the repository root with git, then resolve `workdir` against it.
#[instrument(skip_all, fields(workdir = %workdir.display()))]
pub fn resolve(workdir: &Path) -> Result<Resolved> {
    let root = Git::new(workdir).toplevel()?;
    let resolved = resolve_with_root(&root, workdir)?;
    debug!(root = %resolved.root.display(), path_id = %resolved.path_id, "resolved");
    Ok(resolved)
}
